/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - 各段は pub fn apply(...) -> Router で統一する
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
