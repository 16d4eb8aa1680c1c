//! The message orchestration pipeline.
//!
//! One request flows validate → channel-normalize → generate → envelope,
//! strictly in that order, and always resolves to a status code plus a
//! well-formed envelope — no failure crosses the service boundary as an
//! error value.

pub mod error;
pub mod service;

pub use {
    error::{ChatError, Result},
    service::{ChatService, Reply},
};
