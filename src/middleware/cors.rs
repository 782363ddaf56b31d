//! CORS policy for browser clients.
//!
//! Note:
//! - CORS is enforced by browsers. Native apps and server-to-server calls are
//!   not restricted by it.
//! - This middleware should be applied at the Router level (not inside handlers).
//!
//! Policy:
//! - Allowlisted front-end origins only (exact match, from Config).
//! - Credentialed requests are allowed, so methods/headers mirror the request
//!   instead of using wildcards (wildcards cannot be combined with credentials).
//! - `Authorization` and `Set-Cookie` are exposed so front-ends can read the
//!   token transports.
//! - Preflight responses are cacheable for 3600 s.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, header};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Config;

/// Apply the CORS policy to the given Router.
pub fn apply(router: Router, config: &Config) -> Router {
    // An empty allowlist intentionally allows no origin (no CORS headers),
    // which is safer than accidentally allowing all.
    let allowed: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([header::AUTHORIZATION, header::SET_COOKIE])
        .max_age(Duration::from_secs(3600));

    router.layer(cors)
}
