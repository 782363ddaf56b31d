/*
 * Responsibility
 * - POST /login (operator console の直接ログイン)
 * - 成功: 200 + `Authorization: <token>` response header (cookie ではない)
 * - 失敗: 401 のみ。どの検査で落ちたかは返さない
 */
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Duration;

use crate::api::dto::login::LoginRequest;
use crate::error::AppError;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Form(req): Form<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let principal = match state.credentials.verify(&req.username, &req.password).await {
        Ok(principal) => principal,
        Err(_) => {
            tracing::warn!(username = %req.username, "console login rejected");
            return Err(AppError::Unauthorized);
        }
    };

    let ttl = Duration::seconds(state.session.admin_token_ttl_seconds as i64);
    let token = state
        .auth
        .issue(&principal.id, principal.role, ttl)
        .map_err(|_| AppError::Internal)?;

    tracing::info!(operator = %principal.id, "console login succeeded");
    Ok((StatusCode::OK, [(header::AUTHORIZATION, token)]))
}
