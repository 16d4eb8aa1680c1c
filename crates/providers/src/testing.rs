//! Canned-response clients for tests in downstream crates.

use std::sync::atomic::{AtomicUsize, Ordering};

use {async_trait::async_trait, tracing::debug};

use crate::{
    LlmClient,
    chunking::{chunk_text, validate_chunk_size},
    error::{ProviderError, Result},
};

enum StubBehavior {
    Reply(String),
    FailBackend { status: u16 },
}

/// [`LlmClient`] stub that returns a canned reply (or failure) and counts
/// how many times the backend was reached.
pub struct StubLlm {
    behavior: StubBehavior,
    calls: AtomicUsize,
}

impl StubLlm {
    /// Stub that always answers with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            behavior: StubBehavior::Reply(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Stub whose backend always fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            behavior: StubBehavior::FailBackend { status },
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of backend round trips observed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for StubLlm {
    fn name(&self) -> &str {
        "stub"
    }

    async fn send_message(&self, message: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(message_len = message.len(), "stub backend call");
        match &self.behavior {
            StubBehavior::Reply(reply) => Ok(reply.clone()),
            StubBehavior::FailBackend { status } => Err(ProviderError::Backend {
                status: *status,
                body: "stub failure".into(),
            }),
        }
    }

    async fn send_message_streaming(&self, message: &str, chunk_size: usize) -> Result<String> {
        validate_chunk_size(chunk_size)?;
        let reply = self.send_message(message).await?;
        let mut full = String::with_capacity(reply.len());
        for chunk in chunk_text(&reply, chunk_size)? {
            full.push_str(chunk);
        }
        Ok(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_counts_calls() {
        let stub = StubLlm::replying("ok");
        assert_eq!(stub.call_count(), 0);
        stub.send_message("a").await.expect("reply");
        stub.send_message_streaming("b", 2).await.expect("reply");
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_stub_reports_status() {
        let stub = StubLlm::failing(503);
        let err = stub.send_message("a").await.expect_err("should fail");
        assert!(matches!(err, ProviderError::Backend { status: 503, .. }));
        assert!(err.is_transient());
    }
}
