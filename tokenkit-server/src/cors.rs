use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

fn is_local_origin(origin: &str) -> bool {
    let Some(rest) = origin.strip_prefix("http://").or_else(|| origin.strip_prefix("https://")) else {
        return false;
    };
    LOCAL_HOSTS.iter().any(|host| rest == *host || rest.starts_with(&format!("{host}:")))
}

/// Localhost origins plus any explicitly configured ones.
pub fn build_cors_layer(extra_origins: &[String]) -> CorsLayer {
    let extra = extra_origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            let origin = origin.to_str().unwrap_or("");
            is_local_origin(origin) || extra.iter().any(|o| o == origin)
        }))
        .allow_methods(Any)
        .allow_headers(Any)
}
