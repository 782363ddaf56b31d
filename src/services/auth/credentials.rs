/*
 * Responsibility
 * - 提示された identifier+secret を管理者ディレクトリと照合する
 * - 失敗理由 (unknown user / wrong secret / backend down) は呼び出し側に区別させない
 */
use std::sync::Arc;

use thiserror::Error;

use crate::api::extractors::principal::{Principal, RoleClass};
use crate::repos::admin_repo::AdminDirectory;
use crate::services::auth::password;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The single failure shape for this path. Enumeration-resistant: an
    /// unknown identifier and a wrong secret are the same error.
    #[error("invalid credentials")]
    InvalidCredentials,
}

pub struct CredentialVerifier {
    admins: Arc<dyn AdminDirectory>,
}

impl CredentialVerifier {
    pub fn new(admins: Arc<dyn AdminDirectory>) -> Self {
        Self { admins }
    }

    /// Authenticate an operator. Success yields an Admin-class principal.
    pub async fn verify(
        &self,
        username: &str,
        presented: &str,
    ) -> Result<Principal, CredentialError> {
        let record = match self.admins.find(username).await {
            Ok(record) => record,
            Err(err) => {
                tracing::error!(error = %err, "admin directory lookup failed");
                return Err(CredentialError::InvalidCredentials);
            }
        };

        match record {
            Some(admin) if password::verify(&admin.password_phc, presented) => {
                Ok(Principal::new(admin.username, RoleClass::Admin))
            }
            Some(_) => Err(CredentialError::InvalidCredentials),
            None => {
                // Burn comparable work so a missing identifier is not
                // observable through response timing.
                let _ = password::hash(presented);
                Err(CredentialError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::admin_repo::AdminRecord;
    use crate::repos::memory::InMemoryAdminDirectory;

    fn verifier_with_root() -> CredentialVerifier {
        let admins = InMemoryAdminDirectory::new();
        admins.seed(AdminRecord {
            username: "root".to_string(),
            password_phc: password::hash("hunter2").unwrap(),
        });
        CredentialVerifier::new(Arc::new(admins))
    }

    #[tokio::test]
    async fn correct_credentials_yield_an_admin_principal() {
        let verifier = verifier_with_root();

        let principal = verifier.verify("root", "hunter2").await.unwrap();
        assert_eq!(principal.id, "root");
        assert_eq!(principal.role, RoleClass::Admin);
    }

    #[tokio::test]
    async fn wrong_secret_and_unknown_identifier_are_the_same_failure() {
        let verifier = verifier_with_root();

        let wrong_secret = verifier.verify("root", "hunter3").await.unwrap_err();
        let unknown_user = verifier.verify("nobody", "hunter2").await.unwrap_err();

        assert_eq!(wrong_secret, CredentialError::InvalidCredentials);
        assert_eq!(unknown_user, CredentialError::InvalidCredentials);
        assert_eq!(wrong_secret, unknown_user);
    }
}
