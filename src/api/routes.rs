/*
 * Responsibility
 * - URL 構造を定義 (固定の認可テーブルと 1:1 に対応させる)
 * - login 系は terminal handler。token middleware に gate されない
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{federated, login, pages};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", post(login::login))
        .route("/login/federated/callback", get(federated::callback))
        .route("/join", get(pages::join))
        .route("/user", get(pages::user_page))
        .route("/admin", get(pages::admin))
        .route("/check-login", get(pages::check_login))
}
