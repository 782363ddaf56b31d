/*
 * Responsibility
 * - GET /login/federated/callback (IdP handshake 完了後に一度だけ呼ばれる)
 * - identity bridge -> token 発行 -> HttpOnly cookie -> 302 redirect
 * - handshake 自体の失敗は collaborator 側の詳細。ここでは 401 に畳む
 */
use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Duration;

use crate::error::AppError;
use crate::services::auth::TOKEN_COOKIE;
use crate::state::AppState;

pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let identity = state.handshake.complete(&params).await.map_err(|err| {
        tracing::warn!(error = %err, "federated handshake failed");
        AppError::Unauthorized
    })?;

    let principal = state.bridge.resolve(identity).await.map_err(|err| {
        tracing::warn!(error = %err, "identity bridge rejected the profile");
        AppError::Unauthorized
    })?;

    let ttl_seconds = state.session.user_token_ttl_seconds as i64;
    let token = state
        .auth
        .issue(&principal.id, principal.role, Duration::seconds(ttl_seconds))
        .map_err(|_| AppError::Internal)?;

    // Whole-site HttpOnly cookie; Max-Age mirrors the token lifetime so the
    // browser drops the credential when it stops verifying anyway.
    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::seconds(ttl_seconds))
        .build();

    tracing::info!(user = %principal.id, "federated login succeeded");

    let location = state.session.frontend_redirect_url.to_string();
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, location)],
        jar.add(cookie),
    ))
}
