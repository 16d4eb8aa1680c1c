//! Model client implementations.
//!
//! A client wraps one generative-language backend behind the [`LlmClient`]
//! trait: an atomic complete-response call and a chunk-emitting variant,
//! both backed by a lazily-created, reusable chat session owned by the
//! client instance.

use async_trait::async_trait;

pub mod chunking;
pub mod error;
pub mod gemini;
pub mod testing;

pub use {
    error::{ProviderError, Result},
    gemini::{ChatSession, GeminiClient},
};

/// A conversational generative-language backend.
///
/// Both operations share one lazily-created chat session per client
/// instance, so conversational context carries across calls. The session
/// is serialized internally — concurrent callers on a shared client wait
/// their turn rather than interleaving context.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Backend identifier for logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Submit `message` to the session and return the complete reply text.
    ///
    /// Failures are not retried here; retry policy belongs to the caller.
    async fn send_message(&self, message: &str) -> Result<String>;

    /// Like [`send_message`](Self::send_message) — one backend round trip —
    /// but the reply is re-chunked client-side into pieces of at most
    /// `chunk_size` characters, each surfaced through the chunk-emission
    /// log point before the concatenation (byte-identical to the atomic
    /// result) is returned.
    async fn send_message_streaming(&self, message: &str, chunk_size: usize) -> Result<String>;
}
