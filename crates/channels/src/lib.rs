//! Messaging channel adapters.
//!
//! A channel translates a validated transport payload into the canonical
//! `{message, stream}` intent the orchestrator consumes, and knows how to
//! deliver text back out through its transport. Variants are explicit
//! types selected at construction — the orchestrator never inspects which
//! one it holds.

pub mod bot;
pub mod error;
pub mod plugin;
pub mod web;

pub use {
    bot::BotChannel,
    error::{ChannelError, Result},
    plugin::{CanonicalIntent, MessagingChannel},
    web::WebChannel,
};
