use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokenkit_core::{Slug, Theme, Token};
use tokenkit_export::{ExportBundle, ExportFormat, GenerateOptions};
use tokenkit_sync::{FigmaComponent, Ingestor, SyncRequest, SyncSummary};

use crate::state::AppState;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn err(status: StatusCode, msg: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError::new(msg)))
}

/// Log the failure and answer with a generic message; backend details stay in the log.
fn internal(e: impl std::fmt::Display) -> (StatusCode, Json<ApiError>) {
    tracing::error!(error = %e, "store failure");
    err(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// Check the bearer token when an API key is configured.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<ApiError>)> {
    let Some(expected) = state.config.api_key.as_deref() else {
        return Ok(());
    };
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    match provided {
        Some(token) if token == expected => Ok(()),
        _ => {
            tracing::warn!("rejected request with missing or invalid API key");
            Err(err(StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

/// Decode a write body. Called only after [`authorize`] so that unauthenticated
/// callers always see 401.
fn json_body(body: &Bytes) -> Result<Value, (StatusCode, Json<ApiError>)> {
    serde_json::from_slice(body).map_err(|e| err(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {e}")))
}

/// Validate the raw sync body before typed decoding so that shape problems
/// map to 400 with a readable message.
fn parse_sync_request(body: Value) -> Result<SyncRequest, (StatusCode, Json<ApiError>)> {
    let Some(files) = body.get("tokens").and_then(Value::as_array) else {
        return Err(err(StatusCode::BAD_REQUEST, "Invalid request: tokens array required"));
    };
    for (index, file) in files.iter().enumerate() {
        let has_name = file.get("name").is_some_and(Value::is_string);
        let has_content = file.get("content").is_some_and(|c| c.is_string() || c.is_object());
        if !has_name || !has_content {
            return Err(err(
                StatusCode::BAD_REQUEST,
                format!("Invalid request: tokens[{index}] requires name and content"),
            ));
        }
    }
    serde_json::from_value(body).map_err(|e| err(StatusCode::BAD_REQUEST, format!("Invalid request: {e}")))
}

/// Sync exported token files
pub async fn sync_tokens(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<SyncSummary> {
    authorize(&state, &headers)?;
    let request = parse_sync_request(json_body(&body)?)?;

    let ingestor = Ingestor::new(state.tokens.as_ref(), state.sync.as_ref().clone());
    let summary = ingestor.sync(&request).await.map_err(internal)?;
    Ok(Json(summary))
}

#[derive(Debug, Serialize)]
pub struct ComponentSyncResponse {
    pub success: bool,
    pub component: FigmaComponent,
}

/// Upsert a component by its Figma id
pub async fn sync_component(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ComponentSyncResponse> {
    authorize(&state, &headers)?;
    let body = json_body(&body)?;

    let present = |field: &str| body.get(field).and_then(Value::as_str).is_some_and(|s| !s.trim().is_empty());
    if !present("figma_id") || !present("name") {
        return Err(err(StatusCode::BAD_REQUEST, "Invalid request: figma_id and name required"));
    }

    let mut component: FigmaComponent =
        serde_json::from_value(body).map_err(|e| err(StatusCode::BAD_REQUEST, format!("Invalid request: {e}")))?;
    if component.slug.is_empty() {
        component.slug = Slug::from_name(&component.name).map(|s| s.to_string()).unwrap_or_default();
    }

    let component = state.components.upsert_component(component).await.map_err(internal)?;
    tracing::info!(figma_id = %component.figma_id, name = %component.name, "synced component");
    Ok(Json(ComponentSyncResponse { success: true, component }))
}

/// List all themes
pub async fn list_themes(State(state): State<AppState>) -> ApiResult<Vec<Theme>> {
    state.tokens.list_themes().await.map(Json).map_err(internal)
}

async fn theme_with_tokens(state: &AppState, slug: &str) -> Result<(Theme, Vec<Token>), (StatusCode, Json<ApiError>)> {
    let theme = state
        .tokens
        .get_theme(slug)
        .await
        .map_err(internal)?
        .ok_or_else(|| err(StatusCode::NOT_FOUND, format!("Theme '{slug}' not found")))?;
    let tokens = state.tokens.list_tokens(&theme.id).await.map_err(internal)?;
    Ok((theme, tokens))
}

/// Tokens of one theme in sort order
pub async fn theme_tokens(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Vec<Token>> {
    let (_, tokens) = theme_with_tokens(&state, &slug).await?;
    Ok(Json(tokens))
}

/// Render one export format for a theme
pub async fn export_theme(
    State(state): State<AppState>,
    Path((slug, format)): Path<(String, String)>,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    let format = ExportFormat::from_name(&format)
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, format!("Unknown export format '{format}'")))?;
    let (theme, tokens) = theme_with_tokens(&state, &slug).await?;

    let tokens = tokens.into_iter().map(|t| t.with_theme(theme.name.clone())).collect();
    let now = Utc::now();
    let bundle = ExportBundle::for_package(&state.package, tokens, now).with_themes(vec![theme.name.clone()]);
    let content = format.generate(&bundle, &GenerateOptions::at(now));
    tracing::debug!(theme = %slug, format = %format, bytes = content.len(), "rendered theme export");

    Ok(([(header::CONTENT_TYPE, format.content_type())], content).into_response())
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", version: env!("CARGO_PKG_VERSION") })
}
