//! 経路別認可の施行段
//!
//! Token middleware が identity を載せ終わった後に走る。判定は
//! `policy::AccessPolicy` に委譲し、ここでは HTTP への写像だけを行う:
//! Unauthenticated -> 401, Forbidden -> 403。redirect はしない。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::principal::Principal;
use crate::error::AppError;
use crate::policy::Decision;
use crate::state::AppState;

pub fn apply(router: Router, state: AppState) -> Router {
    router.layer(middleware::from_fn_with_state(state, guard_middleware))
}

async fn guard_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let decision = state
        .policy
        .evaluate(req.uri().path(), req.extensions().get::<Principal>());

    match decision {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Unauthenticated => Err(AppError::Unauthorized),
        Decision::Forbidden => Err(AppError::Forbidden),
    }
}
