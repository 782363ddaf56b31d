use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::state::AppState;

use super::Principal;

/// Handler で Principal を受け取るための extractor
/// middleware が Principal を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（認証がかかってない・ミドルウェア未設定）
pub struct PrincipalExtractor(pub Principal);

impl FromRequestParts<AppState> for PrincipalExtractor
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(PrincipalExtractor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
