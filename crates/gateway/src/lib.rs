//! HTTP transport for the orchestration pipeline: routing, CORS, and the
//! process-wide app state. Thin by design — everything interesting happens
//! in `banter-chat`.

pub mod server;

pub use server::{AppState, build_app, serve};
