/*
 * Responsibility
 * - 認可テーブルの各行に対応する最小の page/probe handler
 * - /admin, /check-login は extractor 経由で Principal を受け取る
 *   (到達可否そのものは前段の access guard が決める)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::api::dto::session::SessionResponse;
use crate::api::extractors::principal::PrincipalExtractor;

pub async fn home() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn join() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"page": "join"})))
}

pub async fn user_page() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"page": "user"})))
}

pub async fn admin(PrincipalExtractor(principal): PrincipalExtractor) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"page": "admin", "operator": principal.id})),
    )
}

/// 現在の token が指す主体を返す (session は存在しないので token が全て)
pub async fn check_login(
    PrincipalExtractor(principal): PrincipalExtractor,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        id: principal.id,
        role: principal.role,
    })
}
