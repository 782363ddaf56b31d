use serde::Deserialize;

/// Form body for `POST /login` (operator console).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
