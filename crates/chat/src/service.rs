use std::sync::Arc;

use {
    banter_channels::MessagingChannel,
    banter_protocol::{ResponseEnvelope, validate::validate},
    banter_providers::LlmClient,
    serde_json::Value,
    tracing::{debug, error, info, warn},
};

use crate::error::Result;

/// What the transport hands back to the caller: an HTTP-style status plus
/// the envelope.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub envelope: ResponseEnvelope,
}

/// Drives one request through validate → normalize → generate → envelope.
///
/// Holds no per-request state; the only state that survives a call is the
/// model client's chat session, owned by the client itself. Requests are
/// never retried and responses are never cached across invocations.
pub struct ChatService {
    channel: Arc<dyn MessagingChannel>,
    llm: Arc<dyn LlmClient>,
    chunk_size: usize,
}

impl ChatService {
    pub fn new(channel: Arc<dyn MessagingChannel>, llm: Arc<dyn LlmClient>, chunk_size: usize) -> Self {
        Self {
            channel,
            llm,
            chunk_size,
        }
    }

    /// Process one raw request document.
    ///
    /// Infallible by contract: every failure inside the pipeline is
    /// converted into a status code and a well-formed envelope here, so
    /// callers never see an error value.
    pub async fn process(&self, raw: &Value) -> Reply {
        match self.run(raw).await {
            Ok((text, stream)) => Reply {
                status: 200,
                envelope: ResponseEnvelope::render(text, stream),
            },
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    error!(error = %e, status, "request failed");
                } else {
                    warn!(error = %e, status, "request rejected");
                }
                // Failures always travel in the full-text field.
                Reply {
                    status,
                    envelope: ResponseEnvelope::full(e.public_message()),
                }
            },
        }
    }

    async fn run(&self, raw: &Value) -> Result<(String, bool)> {
        let request = validate(raw)?;

        let intent = self.channel.receive_message(&request).await?;
        debug!(
            channel = self.channel.id(),
            stream = intent.stream,
            "intent normalized"
        );

        info!(
            backend = self.llm.name(),
            stream = intent.stream,
            "generating response"
        );
        let text = if intent.stream {
            self.llm
                .send_message_streaming(&intent.message, self.chunk_size)
                .await?
        } else {
            self.llm.send_message(&intent.message).await?
        };

        // Push-style channels deliver the reply out-of-band as well; the
        // envelope return path below stays authoritative, so a delivery
        // failure is logged without failing the request.
        if let Err(e) = self
            .channel
            .send_message(&text, Some(&request.user_data.id))
            .await
        {
            error!(channel = self.channel.id(), error = %e, "outbound delivery failed");
        }

        Ok((text, intent.stream))
    }
}

#[cfg(test)]
mod tests {
    use {banter_channels::WebChannel, banter_providers::testing::StubLlm};

    use super::*;

    fn service_with(stub: Arc<StubLlm>, chunk_size: usize) -> ChatService {
        ChatService::new(Arc::new(WebChannel::new()), stub, chunk_size)
    }

    fn request_doc(prompt: &str, stream: bool) -> Value {
        serde_json::json!({
            "prompt_user": prompt,
            "stream": stream,
            "user_data": {
                "id": "u1",
                "browserData": {
                    "userAgent": "ua",
                    "screenResolution": "1x1",
                    "language": "en",
                    "platform": "test"
                }
            }
        })
    }

    #[tokio::test]
    async fn atomic_path_fills_the_full_text_field() {
        let stub = Arc::new(StubLlm::replying("hello"));
        let service = service_with(Arc::clone(&stub), 30);

        let reply = service.process(&request_doc("hi", false)).await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.envelope.response_text.as_deref(), Some("hello"));
        assert!(reply.envelope.response_text_stream.is_none());
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn streamed_path_fills_the_stream_field_with_identical_text() {
        let stub = Arc::new(StubLlm::replying("abcde"));
        let service = service_with(Arc::clone(&stub), 2);

        let reply = service.process(&request_doc("hi", true)).await;
        assert_eq!(reply.status, 200);
        assert!(reply.envelope.response_text.is_none());
        assert_eq!(reply.envelope.response_text_stream.as_deref(), Some("abcde"));
    }

    #[tokio::test]
    async fn invalid_document_never_reaches_the_backend() {
        let stub = Arc::new(StubLlm::replying("unreached"));
        let service = service_with(Arc::clone(&stub), 30);

        let reply = service
            .process(&serde_json::json!({ "prompt_user": "hi" }))
            .await;
        assert_eq!(reply.status, 400);
        let text = reply.envelope.response_text.expect("failure text");
        assert!(text.contains("user_data"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn whitespace_prompt_is_rejected_as_empty_message() {
        let stub = Arc::new(StubLlm::replying("unreached"));
        let service = service_with(Arc::clone(&stub), 30);

        let reply = service.process(&request_doc("   ", false)).await;
        assert_eq!(reply.status, 400);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn backend_fault_becomes_a_generic_500_envelope() {
        let stub = Arc::new(StubLlm::failing(500));
        let service = service_with(Arc::clone(&stub), 30);

        let reply = service.process(&request_doc("hi", false)).await;
        assert_eq!(reply.status, 500);
        let text = reply.envelope.response_text.expect("failure text");
        assert_eq!(text, "Failed to generate the response.");
        assert!(reply.envelope.response_text_stream.is_none());
    }

    #[tokio::test]
    async fn overloaded_backend_becomes_503() {
        let stub = Arc::new(StubLlm::failing(503));
        let service = service_with(Arc::clone(&stub), 30);

        let reply = service.process(&request_doc("hi", false)).await;
        assert_eq!(reply.status, 503);
        assert_eq!(
            reply.envelope.response_text.as_deref(),
            Some("Connection error while generating the response.")
        );
    }

    #[tokio::test]
    async fn streamed_and_atomic_replies_are_identical() {
        let atomic = service_with(Arc::new(StubLlm::replying("same text")), 3)
            .process(&request_doc("hi", false))
            .await;
        let streamed = service_with(Arc::new(StubLlm::replying("same text")), 3)
            .process(&request_doc("hi", true))
            .await;
        assert_eq!(
            atomic.envelope.response_text,
            streamed.envelope.response_text_stream
        );
    }

    #[tokio::test]
    async fn zero_chunk_size_surfaces_as_500_not_a_panic() {
        let stub = Arc::new(StubLlm::replying("hello"));
        let service = service_with(Arc::clone(&stub), 0);

        let reply = service.process(&request_doc("hi", true)).await;
        assert_eq!(reply.status, 500);
        assert_eq!(stub.call_count(), 0);
    }
}
