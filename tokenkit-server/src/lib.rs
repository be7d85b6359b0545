//! # tokenkit-server
//!
//! HTTP surface for tokenkit.
//!
//! | Method | Path | |
//! |--------|------|-|
//! | `POST` | `/api/tokens` | sync exported token files (replace-on-sync) |
//! | `POST` | `/api/components` | upsert a component by Figma id |
//! | `GET` | `/api/themes` | list themes |
//! | `GET` | `/api/themes/{slug}/tokens` | tokens of a theme |
//! | `GET` | `/api/themes/{slug}/export/{format}` | one export format for a theme |
//! | `GET` | `/health` | liveness |
//!
//! Write endpoints require `Authorization: Bearer <key>` when
//! [`ServerConfig::api_key`] is set.

pub mod config;
pub mod cors;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use config::{API_KEY_ENV, DEFAULT_PORT, ServerConfig};
pub use cors::build_cors_layer;
pub use handlers::{ApiError, ApiResult};
pub use routes::api_routes;
pub use state::AppState;

/// The full application router.
pub fn app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.allowed_origins);
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    let addr = state.config.addr();
    let auth = if state.config.api_key.is_some() { "bearer" } else { "none" };
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, auth, "tokenkit server listening");
    axum::serve(listener, app(state)).await
}
