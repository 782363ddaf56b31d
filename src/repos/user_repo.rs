/*
 * Responsibility
 * - 連携ログインユーザの lookup / upsert 契約
 * - id は provider 由来の安定キー。割り当て後は不変
 */
use async_trait::async_trait;

use crate::api::extractors::principal::RoleClass;
use crate::repos::error::RepoError;

#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Stable key derived from the provider identity. Never reassigned.
    pub id: String,
    pub role: RoleClass,
    pub nickname: String,
    pub email: Option<String>,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<UserRecord>, RepoError>;

    /// Insert-or-replace by `id`. Returns the stored record.
    async fn save(&self, record: UserRecord) -> Result<UserRecord, RepoError>;
}
