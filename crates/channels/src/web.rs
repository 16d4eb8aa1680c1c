use {async_trait::async_trait, banter_protocol::PromptRequest, tracing::debug};

use crate::{
    error::Result,
    plugin::{CanonicalIntent, MessagingChannel},
};

/// Channel for browser clients talking to the HTTP API.
///
/// The reply travels back on the synchronous response path, so outbound
/// delivery here is a logging hook only.
#[derive(Debug, Default)]
pub struct WebChannel;

impl WebChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessagingChannel for WebChannel {
    fn id(&self) -> &str {
        "web"
    }

    async fn receive_message(&self, request: &PromptRequest) -> Result<CanonicalIntent> {
        debug!(
            client_id = %request.user_data.id,
            platform = %request.user_data.browser_data.platform,
            language = %request.user_data.browser_data.language,
            stream = request.stream,
            "normalizing web payload"
        );
        CanonicalIntent::from_request(request)
    }

    async fn send_message(&self, text: &str, recipient: Option<&str>) -> Result<()> {
        // Delivery happens via the envelope return path.
        debug!(
            text_len = text.len(),
            recipient = ?recipient,
            "web outbound skipped, reply returns with the envelope"
        );
        Ok(())
    }
}
