/*
 * Responsibility
 * - 管理者レコードの lookup 契約
 * - 実体 (SQL, LDAP, ...) は外部コラボレータ。ここでは trait だけを固定する
 */
use async_trait::async_trait;

use crate::repos::error::RepoError;

/// One operator-console credential.
///
/// `password_phc` is the stored one-way hash in PHC string format; the plain
/// secret never reaches this layer.
#[derive(Debug, Clone)]
pub struct AdminRecord {
    pub username: String,
    pub password_phc: String,
}

#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Look up an admin by identifier. `Ok(None)` and a failed hash check are
    /// collapsed into the same caller-visible failure one layer up.
    async fn find(&self, username: &str) -> Result<Option<AdminRecord>, RepoError>;
}
