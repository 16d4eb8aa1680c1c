//! Shared error plumbing used across all banter crates.

pub mod error;

pub use error::FromMessage;
