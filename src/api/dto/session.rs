use serde::Serialize;

use crate::api::extractors::principal::RoleClass;

/// Body of `GET /check-login`: who the presented token says you are.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub role: RoleClass,
}
