/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)。リクエスト間で可変状態は共有しない
 */
use std::sync::Arc;

use url::Url;

use crate::policy::AccessPolicy;
use crate::services::auth::credentials::CredentialVerifier;
use crate::services::auth::federation::{FederatedHandshake, IdentityBridge};
use crate::services::auth::jwt::TokenAuthority;

/// Session/transport knobs derived from Config once at startup.
#[derive(Clone, Debug)]
pub struct SessionPolicy {
    pub admin_token_ttl_seconds: u64,
    pub user_token_ttl_seconds: u64,
    pub frontend_redirect_url: Url,
}

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<TokenAuthority>,
    pub credentials: Arc<CredentialVerifier>,
    pub bridge: Arc<IdentityBridge>,
    pub handshake: Arc<dyn FederatedHandshake>,
    pub policy: Arc<AccessPolicy>,
    pub session: SessionPolicy,
}

impl AppState {
    pub fn new(
        auth: Arc<TokenAuthority>,
        credentials: Arc<CredentialVerifier>,
        bridge: Arc<IdentityBridge>,
        handshake: Arc<dyn FederatedHandshake>,
        policy: Arc<AccessPolicy>,
        session: SessionPolicy,
    ) -> Self {
        Self {
            auth,
            credentials,
            bridge,
            handshake,
            policy,
            session,
        }
    }
}
