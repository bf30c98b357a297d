use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// CORS policy for endpoints called by browser pages on other domains.
///
/// Any origin may issue simple reads; credentials are never allowed.
pub fn public_read_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}
