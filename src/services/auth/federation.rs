/*
 * Responsibility
 * - 外部 IdP の profile 形を内部 principal 形へ橋渡しする唯一の場所
 * - handshake プロトコル (code exchange, profile fetch) は trait の向こう側
 */
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::extractors::principal::{Principal, RoleClass};
use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserDirectory, UserRecord};

/// Identity confirmed by the external provider. Produced by the handshake
/// collaborator, consumed exactly once by the bridge.
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    pub provider: String,
    /// Subject id inside the provider's namespace.
    pub subject: String,
    /// Raw profile attributes as the provider sent them.
    pub profile: Map<String, Value>,
}

impl ExternalIdentity {
    /// Stable internal key: `{provider}_{subject}`. Immutable once assigned.
    pub fn stable_id(&self) -> String {
        format!("{}_{}", self.provider, self.subject)
    }
}

#[derive(Debug, Error)]
pub enum HandshakeError {
    #[error("provider handshake failed: {0}")]
    Failed(String),
}

/// The provider protocol lives behind this trait; the pipeline only ever
/// sees the resolved identity. Failures here stay the collaborator's detail.
#[async_trait]
pub trait FederatedHandshake: Send + Sync {
    async fn complete(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<ExternalIdentity, HandshakeError>;
}

/// Default wiring when no provider is configured: every callback is refused.
pub struct UnconfiguredHandshake;

#[async_trait]
impl FederatedHandshake for UnconfiguredHandshake {
    async fn complete(
        &self,
        _params: &HashMap<String, String>,
    ) -> Result<ExternalIdentity, HandshakeError> {
        Err(HandshakeError::Failed(
            "no identity provider configured".to_string(),
        ))
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The profile lacked a field we require. Surfaced loudly here instead of
    /// letting an untyped map travel deeper into the pipeline.
    #[error("profile is missing required field '{0}'")]
    MissingField(&'static str),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Maps an external identity onto an internal user, merge-or-create.
///
/// First login auto-provisions the user with role User, no approval step.
/// On later logins the stored record wins on role; display attributes are
/// refreshed from the incoming profile.
pub struct IdentityBridge {
    users: Arc<dyn UserDirectory>,
}

impl IdentityBridge {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn resolve(&self, identity: ExternalIdentity) -> Result<Principal, BridgeError> {
        let id = identity.stable_id();
        let nickname = required_str(&identity.profile, "nickname")?.to_string();
        let email = identity
            .profile
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_string);

        let record = match self.users.find(&id).await? {
            Some(mut existing) => {
                existing.nickname = nickname;
                existing.email = email;
                self.users.save(existing).await?
            }
            None => {
                self.users
                    .save(UserRecord {
                        id: id.clone(),
                        role: RoleClass::User,
                        nickname,
                        email,
                    })
                    .await?
            }
        };

        let mut principal = Principal::new(record.id, record.role);
        principal
            .attributes
            .insert("nickname".to_string(), record.nickname);
        if let Some(email) = record.email {
            principal.attributes.insert("email".to_string(), email);
        }
        Ok(principal)
    }
}

fn required_str<'a>(
    profile: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, BridgeError> {
    profile
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(BridgeError::MissingField(key))
}
