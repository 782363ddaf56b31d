//! Token 検証 → Principal を extensions に入れる、の二系統
//!
//! 同じ検証ロジックを transport と受理 role だけ変えて二回適用する:
//! - admin 系: `Authorization` ヘッダ (bearer-style) を読み、Admin のみ受理
//! - user 系: `Authorization` cookie を読み、User のみ受理
//!
//! 契約:
//! - token が無ければ素通し (失敗させない)。拒否は後段の access guard の仕事
//! - token があって検証に失敗しても素通し (warn ログのみ)。同上
//! - 先行する段が載せた Principal は上書きしない

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::extractors::principal::{Principal, RoleClass};
use crate::services::auth::TOKEN_COOKIE;
use crate::state::AppState;

/// Header-transport instance: accepts Admin-class tokens only.
pub fn apply_admin(router: Router, state: AppState) -> Router {
    router.layer(middleware::from_fn_with_state(state, admin_token_middleware))
}

/// Cookie-transport instance: accepts User-class tokens only.
pub fn apply_user(router: Router, state: AppState) -> Router {
    router.layer(middleware::from_fn_with_state(state, user_token_middleware))
}

async fn admin_token_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if req.extensions().get::<Principal>().is_none() {
        let token = header_token(req.headers()).map(str::to_string);
        if let Some(token) = token {
            attach_if_valid(&state, &token, RoleClass::Admin, &mut req);
        }
    }
    next.run(req).await
}

async fn user_token_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if req.extensions().get::<Principal>().is_none() {
        let token = cookie_token(req.headers());
        if let Some(token) = token {
            attach_if_valid(&state, &token, RoleClass::User, &mut req);
        }
    }
    next.run(req).await
}

/// `Authorization: <token>` as issued; a conventional `Bearer ` prefix is
/// tolerated for standard clients.
fn header_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    Some(raw.strip_prefix("Bearer ").unwrap_or(raw))
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn attach_if_valid(state: &AppState, token: &str, accepted: RoleClass, req: &mut Request<Body>) {
    match state.auth.verify(token) {
        Ok(principal) if principal.role == accepted => {
            req.extensions_mut().insert(principal);
        }
        Ok(principal) => {
            tracing::warn!(
                role = principal.role.as_str(),
                accepted = accepted.as_str(),
                "token role does not match this transport"
            );
        }
        Err(err) => {
            // Invalid tokens degrade to "no principal"; the access guard
            // produces the user-visible failure.
            tracing::warn!(error = %err, "token verification failed");
        }
    }
}
