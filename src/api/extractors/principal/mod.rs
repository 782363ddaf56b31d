/*!
 * Authenticated principal extractor
 *
 * Responsibility:
 * - 認証済みリクエストの principal を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - Principal, RoleClass
 * - PrincipalExtractor
 */

mod core;
mod types;

pub use core::PrincipalExtractor;
pub use types::{Principal, RoleClass};
