/*
 * Responsibility
 * - token の発行/検証、credential 照合、連携 identity の橋渡し
 * - handler と middleware が共有する transport 定数
 */
pub mod credentials;
pub mod factory;
pub mod federation;
pub mod jwt;
pub mod password;

/// Name shared by the direct-login response header and the federated-login
/// cookie. Both carry the same token format.
pub const TOKEN_COOKIE: &str = "Authorization";
