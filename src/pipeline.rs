/*
 * Responsibility
 * - interceptor chain を「列挙可能な順序付きリスト」として固定する
 * - assemble() はそのリストを畳み込むだけ。リストが唯一の順序定義
 */
use axum::Router;

use crate::{api, config::Config, middleware, state::AppState};

/// One stage of the request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Request-id, tracing, body limit, timeout.
    HttpInfra,
    SecurityHeaders,
    /// Preflights are answered here and never reach the auth stages.
    Cors,
    /// Reads the `Authorization` header; accepts Admin-class tokens.
    AdminToken,
    /// Reads the `Authorization` cookie; accepts User-class tokens.
    UserToken,
    /// Path policy enforcement; runs after identity attachment.
    AccessGuard,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::HttpInfra => "http_infra",
            Stage::SecurityHeaders => "security_headers",
            Stage::Cors => "cors",
            Stage::AdminToken => "admin_token",
            Stage::UserToken => "user_token",
            Stage::AccessGuard => "access_guard",
        }
    }
}

/// Outermost first: the first stage here is the first to see a request.
/// Login routes are terminal handlers below all of these, so issuing a token
/// never requires already having one.
pub fn stages() -> [Stage; 6] {
    [
        Stage::HttpInfra,
        Stage::SecurityHeaders,
        Stage::Cors,
        Stage::AdminToken,
        Stage::UserToken,
        Stage::AccessGuard,
    ]
}

/// Fold the stage list onto the route table.
///
/// `Router::layer` wraps: a stage applied later ends up outside the ones
/// applied before it, so the list is folded back-to-front.
pub fn assemble(state: AppState, config: &Config) -> Router {
    let mut router = api::routes().with_state(state.clone());
    for stage in stages().into_iter().rev() {
        router = apply(stage, router, &state, config);
    }
    router
}

fn apply(stage: Stage, router: Router, state: &AppState, config: &Config) -> Router {
    match stage {
        Stage::HttpInfra => middleware::http::apply(router),
        Stage::SecurityHeaders => middleware::security_headers::apply(router),
        Stage::Cors => middleware::cors::apply(router, config),
        Stage::AdminToken => middleware::auth::token::apply_admin(router, state.clone()),
        Stage::UserToken => middleware::auth::token::apply_user(router, state.clone()),
        Stage::AccessGuard => middleware::auth::guard::apply(router, state.clone()),
    }
}
