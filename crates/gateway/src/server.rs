use std::sync::Arc;

use {
    axum::{
        Json, Router,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Redirect, Response},
        routing::{get, post},
    },
    tower_http::cors::{Any, CorsLayer},
    tracing::info,
};

use {banter_chat::ChatService, banter_protocol::ResponseEnvelope};

// ── Shared app state ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    /// Browser GETs on API routes bounce here.
    pub frontend_url: Option<String>,
}

// ── Router ───────────────────────────────────────────────────────────────────

/// Build the gateway router (shared between production startup and tests).
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(frontend_redirect))
        .route(
            "/receive-data",
            post(receive_data).get(frontend_redirect).head(head_probe),
        )
        .route("/health-check", get(health_check))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(bind: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "gateway listening");
    axum::serve(listener, build_app(state)).await?;
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn receive_data(
    State(state): State<AppState>,
    Json(raw): Json<serde_json::Value>,
) -> impl IntoResponse {
    let reply = state.chat.process(&raw).await;
    let status =
        StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply.envelope))
}

async fn frontend_redirect(State(state): State<AppState>) -> Response {
    match &state.frontend_url {
        Some(url) => Redirect::temporary(url).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Liveness probes send HEAD; answer without a body.
async fn head_probe() -> StatusCode {
    StatusCode::OK
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ResponseEnvelope::full("The server is operative.")),
    )
}
