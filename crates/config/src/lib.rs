//! Configuration for the banter gateway: typed settings schema, TOML file
//! discovery, environment overrides, and startup secrets.
//!
//! Loading failures here are startup-fatal by design — a missing credential
//! or persona file should stop the process before it binds a socket, not
//! surface per-request.

pub mod error;
pub mod loader;
pub mod schema;
pub mod secrets;

pub use {
    error::{ConfigError, Result},
    loader::{discover_and_load, load_config, load_system_instruction},
    schema::{BanterConfig, ChatConfig, GeminiConfig, GenerationConfig, ServerConfig},
    secrets::Secrets,
};
