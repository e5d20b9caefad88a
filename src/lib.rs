pub mod config;
pub mod error;
pub mod game;

pub use game::core::messages;
pub use game::core::{Color, ConnectionId};
pub use game::SessionCoordinator;

use axum::{
    Router,
    extract::{State, WebSocketUpgrade, ws::WebSocket},
    response::Response,
    routing::get,
};
use config::CorsConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

async fn health() -> &'static str {
    "ok"
}

#[derive(Clone, Default)]
pub struct AppState {
    pub sessions: Arc<SessionCoordinator>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    game::handle_connection(socket, state.sessions).await;
}

pub fn app() -> Router {
    app_with_config(&CorsConfig::default())
}

pub fn app_with_config(cors: &CorsConfig) -> Router {
    router(AppState::new(), cors)
}

/// Build the router around existing state, so callers can inspect rooms.
pub fn router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        .layer(cors.layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
