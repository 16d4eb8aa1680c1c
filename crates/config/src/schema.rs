//! Typed configuration schema with serde defaults.

use serde::Deserialize;

/// Top-level configuration, merged from `banter.toml` and environment
/// overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BanterConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Where browser `GET` requests on API routes are redirected.
    pub frontend_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 5000,
            frontend_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub model: String,
    pub base_url: String,
    /// Path of the persona / system-instruction text file fed to the model
    /// at client construction.
    pub system_instruction_path: String,
    pub generation: GenerationConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
            system_instruction_path: "config/system_instruction.txt".into(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Decoding parameters passed through to the generative backend verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Character count per emitted chunk on the streamed path.
    pub chunk_size: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { chunk_size: 30 }
    }
}
