use {async_trait::async_trait, banter_protocol::PromptRequest};

use crate::error::{ChannelError, Result};

// ── Canonical intent ────────────────────────────────────────────────────────

/// The normalized shape every channel produces for the orchestrator:
/// what to say to the model, and whether the reply should be chunked.
///
/// `message` is guaranteed non-empty once construction succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalIntent {
    pub message: String,
    pub stream: bool,
}

impl CanonicalIntent {
    /// Build an intent from a validated request document.
    ///
    /// An empty (or whitespace-only) prompt fails with
    /// [`ChannelError::EmptyMessage`] — length limits are the validator's
    /// job, emptiness is decided here, after normalization.
    pub fn from_request(request: &PromptRequest) -> Result<Self> {
        let message = request.prompt_user.trim();
        if message.is_empty() {
            return Err(ChannelError::EmptyMessage);
        }
        Ok(Self {
            message: message.to_string(),
            stream: request.stream,
        })
    }
}

// ── Channel trait ───────────────────────────────────────────────────────────

/// A messaging transport adapter.
///
/// `receive_message` turns an inbound validated payload into a
/// [`CanonicalIntent`]; `send_message` pushes text back out through the
/// transport. Channels propagate malformed-intent failures upward —
/// they never swallow them.
#[async_trait]
pub trait MessagingChannel: Send + Sync {
    /// Channel identifier for logs (e.g. "web", "bot").
    fn id(&self) -> &str;

    /// Normalize an inbound payload into the canonical intent.
    async fn receive_message(&self, request: &PromptRequest) -> Result<CanonicalIntent>;

    /// Deliver `text` outward. `recipient` is transport-specific; channels
    /// that reply on the synchronous return path may treat this as a no-op.
    async fn send_message(&self, text: &str, recipient: Option<&str>) -> Result<()>;
}
