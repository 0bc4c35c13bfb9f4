//! CORS policy for the browser front-end of the task list.
//!
//! Note:
//! - Only browsers enforce CORS; the bearer token is what actually guards writes.
//! - Applied once at the Router level, after the versioned routes are assembled.
//!
//! Policy:
//! - Development: any origin, without credentials.
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`, without credentials.
//!   An empty allowlist allows no origin.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

/// Apply the CORS policy to the given Router.
///
/// The token travels in `Authorization`, not a cookie, so credentials stay disabled
/// in both modes.
pub fn apply(router: Router, config: &Config) -> Router {
    let cors = if config.app_env.is_production() {
        // Unparseable entries are skipped rather than widening the policy.
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new().allow_origin(allow_origin)
    } else {
        // Development: local front-ends on arbitrary ports
        CorsLayer::new().allow_origin(Any)
    }
    // exactly the methods the task routes answer to
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static("x-request-id"),
    ])
    .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
