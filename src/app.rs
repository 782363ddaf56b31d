/*
 * Responsibility
 * - Config読み込み → 依存生成 → pipeline 組み立て
 * - tracing / panic hook の初期化
 * - axum::serve() で起動
 */
use std::sync::Arc;
use std::{panic, process};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::pipeline;
use crate::policy::AccessPolicy;
use crate::repos::admin_repo::{AdminDirectory, AdminRecord};
use crate::repos::memory::{InMemoryAdminDirectory, InMemoryUserDirectory};
use crate::services::auth::factory;
use crate::services::auth::federation::{FederatedHandshake, UnconfiguredHandshake};
use crate::state::{AppState, SessionPolicy};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,auth_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice
        // immediately. In production, prefer the default behavior.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting gateway in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = pipeline::assemble(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> AppState {
    // Directory backends are collaborators behind traits; the in-memory
    // implementations carry the default wiring.
    let admins = Arc::new(InMemoryAdminDirectory::new());
    if let (Some(username), Some(phc)) = (&config.admin_username, &config.admin_password_phc) {
        admins.seed(AdminRecord {
            username: username.clone(),
            password_phc: phc.clone(),
        });
    }
    let admins: Arc<dyn AdminDirectory> = admins;
    let users = Arc::new(InMemoryUserDirectory::new());

    let auth = factory::build_token_authority(config);
    let credentials = factory::build_credential_verifier(admins);
    let bridge = factory::build_identity_bridge(users);
    let handshake: Arc<dyn FederatedHandshake> = Arc::new(UnconfiguredHandshake);

    let session = SessionPolicy {
        admin_token_ttl_seconds: config.admin_token_ttl_seconds,
        user_token_ttl_seconds: config.user_token_ttl_seconds,
        frontend_redirect_url: config.frontend_redirect_url.clone(),
    };

    AppState::new(
        auth,
        credentials,
        bridge,
        handshake,
        Arc::new(AccessPolicy::standard()),
        session,
    )
}
