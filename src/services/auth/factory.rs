/// Factory: build the auth services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::admin_repo::AdminDirectory;
use crate::repos::user_repo::UserDirectory;
use crate::services::auth::credentials::CredentialVerifier;
use crate::services::auth::federation::IdentityBridge;
use crate::services::auth::jwt::{SystemClock, TokenAuthority};

pub fn build_token_authority(config: &Config) -> Arc<TokenAuthority> {
    Arc::new(TokenAuthority::new(
        config.token_secret.as_bytes(),
        Arc::new(SystemClock),
    ))
}

pub fn build_credential_verifier(admins: Arc<dyn AdminDirectory>) -> Arc<CredentialVerifier> {
    Arc::new(CredentialVerifier::new(admins))
}

pub fn build_identity_bridge(users: Arc<dyn UserDirectory>) -> Arc<IdentityBridge> {
    Arc::new(IdentityBridge::new(users))
}
