/*
 * Responsibility
 * - 環境変数や設定の読み込み (署名シークレット, CORS 許可, TTL, リダイレクト先)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::{env, fmt};

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// Origins allowed to make credentialed browser requests.
    pub cors_allowed_origins: Vec<String>,

    /// Symmetric signing secret shared only within this service.
    /// Its absence aborts startup; tokens must never be signed with a default.
    pub token_secret: String,

    /// Lifetime of tokens issued by the operator-console login.
    pub admin_token_ttl_seconds: u64,
    /// Lifetime of tokens issued after a federated login (also the cookie Max-Age).
    pub user_token_ttl_seconds: u64,

    /// Front-end origin the federated callback redirects to.
    pub frontend_redirect_url: Url,

    /// Optional seed for the in-process admin directory.
    pub admin_username: Option<String>,
    pub admin_password_phc: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| {
                "http://localhost:3000,http://localhost:5173,http://localhost:5174".to_string()
            })
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let token_secret =
            env::var("TOKEN_SECRET").map_err(|_| ConfigError::Missing("TOKEN_SECRET"))?;
        if token_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("TOKEN_SECRET"));
        }

        let admin_token_ttl_seconds = env::var("ADMIN_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(36_000); // 10 h operator session
        let user_token_ttl_seconds = env::var("USER_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(86_400); // 24 h, mirrored by the cookie Max-Age

        let frontend_redirect_url = env::var("FRONTEND_REDIRECT_URL")
            .unwrap_or_else(|_| "http://localhost:5174/".to_string());
        let frontend_redirect_url = Url::parse(&frontend_redirect_url)
            .map_err(|_| ConfigError::Invalid("FRONTEND_REDIRECT_URL"))?;

        // Seed credentials come as a pair; half a pair is a config mistake.
        let admin_username = env::var("ADMIN_USERNAME").ok();
        let admin_password_phc = env::var("ADMIN_PASSWORD_HASH").ok();
        match (&admin_username, &admin_password_phc) {
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD_HASH")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADMIN_USERNAME")),
            _ => {}
        }

        Ok(Config {
            addr,
            app_env,
            cors_allowed_origins,
            token_secret,
            admin_token_ttl_seconds,
            user_token_ttl_seconds,
            frontend_redirect_url,
            admin_username,
            admin_password_phc,
        })
    }
}
