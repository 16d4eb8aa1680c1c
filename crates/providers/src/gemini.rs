//! Gemini-backed [`LlmClient`] over the Generative Language REST API.

use {
    async_trait::async_trait,
    banter_config::GeminiConfig,
    secrecy::{ExposeSecret, Secret},
    serde_json::{Value, json},
    tokio::sync::Mutex,
    tracing::{debug, info, warn},
};

use crate::{
    LlmClient,
    chunking::{chunk_text, validate_chunk_size},
    error::{ProviderError, Result},
};

// ── Chat session ────────────────────────────────────────────────────────────

/// Conversational history for one client instance.
///
/// The REST backend is stateless, so the session is the accumulated
/// user/model turns replayed on every call. Owned exclusively by its
/// client; created lazily on first send; never closed.
#[derive(Debug, Default)]
pub struct ChatSession {
    history: Vec<Value>,
}

impl ChatSession {
    /// History plus the new user turn, in wire order.
    fn contents_with(&self, message: &str) -> Vec<Value> {
        let mut contents = self.history.clone();
        contents.push(user_turn(message));
        contents
    }

    /// Append a completed exchange. Only called after the backend accepted
    /// the turn, so a failed call leaves the session unchanged.
    fn record_exchange(&mut self, message: &str, reply: &str) {
        self.history.push(user_turn(message));
        self.history.push(json!({
            "role": "model",
            "parts": [{ "text": reply }],
        }));
    }

    #[cfg(test)]
    fn turns(&self) -> usize {
        self.history.len()
    }
}

fn user_turn(message: &str) -> Value {
    json!({
        "role": "user",
        "parts": [{ "text": message }],
    })
}

// ── Client ──────────────────────────────────────────────────────────────────

pub struct GeminiClient {
    api_key: Secret<String>,
    config: GeminiConfig,
    system_instruction: String,
    client: reqwest::Client,
    /// Lock order: taken for the whole send so concurrent callers on a
    /// shared client cannot interleave conversational context.
    session: Mutex<Option<ChatSession>>,
}

impl GeminiClient {
    pub fn new(api_key: Secret<String>, config: GeminiConfig, system_instruction: String) -> Self {
        Self {
            api_key,
            config,
            system_instruction,
            client: reqwest::Client::new(),
            session: Mutex::new(None),
        }
    }

    /// One backend round trip: replay history + `message`, parse the reply,
    /// record the exchange. Creates the session on first use; a second
    /// creation attempt is a no-op.
    async fn generate(&self, message: &str) -> Result<String> {
        let mut slot = self.session.lock().await;
        let session = slot.get_or_insert_with(|| {
            info!(model = %self.config.model, "chat session started");
            ChatSession::default()
        });

        let body = json!({
            "contents": session.contents_with(message),
            "systemInstruction": {
                "parts": [{ "text": self.system_instruction }],
            },
            "generationConfig": {
                "temperature": self.config.generation.temperature,
                "topP": self.config.generation.top_p,
                "topK": self.config.generation.top_k,
                "maxOutputTokens": self.config.generation.max_output_tokens,
                "responseMimeType": self.config.generation.response_mime_type,
            },
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let http_resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|source| ProviderError::Unreachable { source })?;

        let status = http_resp.status();
        if !status.is_success() {
            let body_text = http_resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body_text, "gemini API error");
            return Err(ProviderError::Backend {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let resp: Value = http_resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let reply = extract_text(&resp)?;

        session.record_exchange(message, &reply);
        Ok(reply)
    }

    #[cfg(test)]
    async fn session_turns(&self) -> usize {
        self.session.lock().await.as_ref().map_or(0, ChatSession::turns)
    }
}

/// Join the text parts of the first candidate.
fn extract_text(resp: &Value) -> Result<String> {
    let parts = resp["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| ProviderError::Malformed("response has no candidate parts".into()))?;

    let texts: Vec<&str> = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if texts.is_empty() {
        return Err(ProviderError::Malformed(
            "candidate contains no text part".into(),
        ));
    }
    Ok(texts.join(""))
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn send_message(&self, message: &str) -> Result<String> {
        info!(message_len = message.chars().count(), "generation start");
        let reply = self.generate(message).await?;
        info!(reply_len = reply.chars().count(), "generation complete");
        Ok(reply)
    }

    async fn send_message_streaming(&self, message: &str, chunk_size: usize) -> Result<String> {
        // Bad parameters fail before any backend work happens.
        validate_chunk_size(chunk_size)?;

        info!(
            message_len = message.chars().count(),
            chunk_size, "generation start (chunked)"
        );
        let reply = self.generate(message).await?;

        let mut full = String::with_capacity(reply.len());
        for (i, chunk) in chunk_text(&reply, chunk_size)?.iter().enumerate() {
            debug!(index = i, chunk_len = chunk.chars().count(), "chunk emitted");
            full.push_str(chunk);
        }

        info!(
            reply_len = full.chars().count(),
            "generation complete (chunked)"
        );
        Ok(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> GeminiClient {
        let config = GeminiConfig {
            base_url: server.url(),
            ..GeminiConfig::default()
        };
        GeminiClient::new(
            Secret::new("test-key".into()),
            config,
            "You are terse.".into(),
        )
    }

    fn reply_body(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] }
            }]
        })
        .to_string()
    }

    const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    #[tokio::test]
    async fn send_message_returns_reply_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(reply_body("hello there"))
            .create_async()
            .await;

        let client = client_for(&server);
        let reply = client.send_message("hi").await.expect("reply");
        assert_eq!(reply, "hello there");
    }

    #[tokio::test]
    async fn session_is_created_lazily_and_reused() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_body(reply_body("alpha"))
            .expect(1)
            .create_async()
            .await;
        // The second request must replay the first exchange.
        let second = server
            .mock("POST", GENERATE_PATH)
            .match_body(mockito::Matcher::Regex("alpha".into()))
            .with_status(200)
            .with_body(reply_body("beta"))
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        assert_eq!(client.session_turns().await, 0, "no session before first use");

        client.send_message("one").await.expect("first");
        assert_eq!(client.session_turns().await, 2);

        client.send_message("two").await.expect("second");
        assert_eq!(client.session_turns().await, 4);
        second.assert_async().await;
    }

    #[tokio::test]
    async fn fresh_client_starts_a_context_free_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_body(reply_body("alpha"))
            .expect(2)
            .create_async()
            .await;

        let first = client_for(&server);
        first.send_message("one").await.expect("send");

        let second = client_for(&server);
        assert_eq!(second.session_turns().await, 0);
        second.send_message("two").await.expect("send");
        assert_eq!(second.session_turns().await, 2);
        // The first client's history is untouched by the second.
        assert_eq!(first.session_turns().await, 2);
    }

    #[tokio::test]
    async fn failed_call_leaves_session_unchanged() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.send_message("hi").await.expect_err("should fail");
        assert!(matches!(err, ProviderError::Backend { status: 500, .. }));
        assert_eq!(client.session_turns().await, 0);
    }

    #[tokio::test]
    async fn streaming_result_matches_atomic_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_body(reply_body("abcde"))
            .expect(2)
            .create_async()
            .await;

        let atomic = client_for(&server).send_message("hi").await.expect("atomic");
        let chunked = client_for(&server)
            .send_message_streaming("hi", 2)
            .await
            .expect("chunked");
        assert_eq!(atomic, chunked);
        assert_eq!(chunked, "abcde");
    }

    #[tokio::test]
    async fn zero_chunk_size_fails_without_touching_the_backend() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .send_message_streaming("hi", 0)
            .await
            .expect_err("should fail");
        assert!(matches!(err, ProviderError::Configuration(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_reply_streams_to_empty_string() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_body(reply_body(""))
            .create_async()
            .await;

        let client = client_for(&server);
        let reply = client
            .send_message_streaming("hi", 30)
            .await
            .expect("reply");
        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn missing_candidates_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.send_message("hi").await.expect_err("should fail");
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn session_records_exchanges_in_wire_order() {
        let mut session = ChatSession::default();
        session.record_exchange("q1", "a1");
        let contents = session.contents_with("q2");
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "q1");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "a1");
        assert_eq!(contents[2]["parts"][0]["text"], "q2");
    }
}
