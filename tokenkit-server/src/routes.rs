use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/tokens", post(handlers::sync_tokens))
        .route("/components", post(handlers::sync_component))
        .route("/themes", get(handlers::list_themes))
        .route("/themes/{slug}/tokens", get(handlers::theme_tokens))
        .route("/themes/{slug}/export/{format}", get(handlers::export_theme))
}
