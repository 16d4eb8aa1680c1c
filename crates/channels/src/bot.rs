use {
    async_trait::async_trait,
    banter_protocol::PromptRequest,
    tracing::{debug, info},
};

use crate::{
    error::{ChannelError, Result},
    plugin::{CanonicalIntent, MessagingChannel},
};

/// Upper bound per pushed message; longer replies are split.
const BOT_MAX_MESSAGE_CHARS: usize = 4096;

/// Channel for chat-bot transports that receive replies by push.
///
/// Inbound payloads share the web document shape; the sender's `user_data.id`
/// doubles as the chat identifier to push replies back to. Outbound text is
/// POSTed to the configured push endpoint, split into transport-sized pieces.
pub struct BotChannel {
    push_url: String,
    client: reqwest::Client,
}

impl BotChannel {
    pub fn new(push_url: impl Into<String>) -> Self {
        Self {
            push_url: push_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MessagingChannel for BotChannel {
    fn id(&self) -> &str {
        "bot"
    }

    async fn receive_message(&self, request: &PromptRequest) -> Result<CanonicalIntent> {
        let chat_id = request.user_data.id.as_str();
        debug!(chat_id, stream = request.stream, "normalizing bot payload");
        CanonicalIntent::from_request(request)
    }

    async fn send_message(&self, text: &str, recipient: Option<&str>) -> Result<()> {
        let chat_id = recipient.ok_or(ChannelError::MissingRecipient)?;

        let pieces = split_for_push(text, BOT_MAX_MESSAGE_CHARS);
        info!(
            chat_id,
            text_len = text.len(),
            piece_count = pieces.len(),
            "bot outbound send start"
        );

        for piece in &pieces {
            let resp = self
                .client
                .post(&self.push_url)
                .json(&serde_json::json!({ "chat_id": chat_id, "text": piece }))
                .send()
                .await
                .map_err(|e| ChannelError::delivery("bot push request failed", e))?;
            resp.error_for_status()
                .map_err(|e| ChannelError::delivery("bot push rejected", e))?;
        }

        info!(chat_id, piece_count = pieces.len(), "bot outbound sent");
        Ok(())
    }
}

/// Split `text` into pieces of at most `max_chars` characters, on char
/// boundaries, preserving order and content exactly.
fn split_for_push(text: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for (count, ch) in text.chars().enumerate() {
        if count > 0 && count % max_chars == 0 {
            pieces.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
