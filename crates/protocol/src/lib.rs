//! Wire types for the prompt-orchestration API.
//!
//! Inbound: the untrusted request document (`PromptRequest` once validated
//! through [`validate::validate`]). Outbound: the [`ResponseEnvelope`] every
//! request resolves to, success or failure.

use serde::{Deserialize, Serialize};

pub mod validate;

pub use validate::{FieldViolation, ValidationError};

// ── Constants ────────────────────────────────────────────────────────────────

/// Maximum accepted prompt length, in characters.
pub const MAX_PROMPT_CHARS: usize = 255;

// ── Request document ─────────────────────────────────────────────────────────

/// A validated request document.
///
/// Produced only by [`validate::validate`]; handlers never deserialize the
/// raw body straight into this type, because serde stops at the first bad
/// field and the API contract reports *all* of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt_user: String,
    #[serde(default)]
    pub stream: bool,
    pub user_data: UserData,
    /// Upstream clients default an absent `datetime` to JSON `false` rather
    /// than omitting the key or sending a numeric sentinel. The default is
    /// kept verbatim so echoed documents round-trip unchanged.
    #[serde(default = "default_datetime")]
    pub datetime: serde_json::Value,
}

fn default_datetime() -> serde_json::Value {
    serde_json::Value::Bool(false)
}

/// Client identity plus the browser fingerprint block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub id: String,
    #[serde(rename = "browserData")]
    pub browser_data: BrowserData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserData {
    pub user_agent: String,
    pub screen_resolution: String,
    pub language: String,
    pub platform: String,
}

// ── Response envelope ────────────────────────────────────────────────────────

/// Final response shape returned to the transport layer.
///
/// Exactly one of the two fields is populated; the other serializes as an
/// explicit `null` so consumers can tell "no content" from "content in the
/// other mode".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub response_text: Option<String>,
    pub response_text_stream: Option<String>,
}

impl ResponseEnvelope {
    /// Envelope for an atomic (non-streamed) reply.
    pub fn full(text: impl Into<String>) -> Self {
        Self {
            response_text: Some(text.into()),
            response_text_stream: None,
        }
    }

    /// Envelope for a chunk-streamed reply.
    pub fn streamed(text: impl Into<String>) -> Self {
        Self {
            response_text: None,
            response_text_stream: Some(text.into()),
        }
    }

    /// Place `message` in the field selected by `stream`.
    pub fn render(message: impl Into<String>, stream: bool) -> Self {
        if stream {
            Self::streamed(message)
        } else {
            Self::full(message)
        }
    }
}
