/*
 * Responsibility
 * - 環境変数の読み込み (Cognito pool, client id, store/sink の接続先など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
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

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Identity provider (Cognito user pool)
    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_jwks_url: Url,
    pub auth_token_use: Option<String>,
    pub access_token_leeway_seconds: u64,
    pub jwks_cache_ttl: Duration,
    pub jwks_refresh_cooldown: Duration,

    // Bound for key-set fetch, store and sink calls
    pub dependency_timeout: Duration,

    pub database_url: Option<String>,

    pub notify_webhook_url: Option<Url>,
    pub notify_topic: String,
}

/// Issuer string Cognito puts into `iss` for a given pool.
pub fn cognito_issuer(region: &str, pool_id: &str) -> String {
    format!("https://cognito-idp.{region}.amazonaws.com/{pool_id}")
}

/// Well-known key-set endpoint published under an issuer.
pub fn jwks_url_for(issuer: &str) -> String {
    format!("{}/.well-known/jwks.json", issuer.trim_end_matches('/'))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn seconds_or(key: &str, default: u64) -> u64 {
    optional(key)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
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

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let region = required("COGNITO_REGION")?;
        let pool_id = required("COGNITO_POOL_ID")?;
        let auth_issuer = cognito_issuer(&region, &pool_id);

        let auth_audience = required("APP_CLIENT_ID")?;

        let auth_jwks_url = optional("AUTH_JWKS_URL").unwrap_or_else(|| jwks_url_for(&auth_issuer));
        let auth_jwks_url =
            Url::parse(&auth_jwks_url).map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?;
        if app_env.is_production() && auth_jwks_url.scheme() != "https" {
            return Err(ConfigError::Invalid("AUTH_JWKS_URL"));
        }

        let notify_webhook_url = optional("NOTIFY_WEBHOOK_URL")
            .map(|raw| Url::parse(&raw).map_err(|_| ConfigError::Invalid("NOTIFY_WEBHOOK_URL")))
            .transpose()?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            auth_issuer,
            auth_audience,
            auth_jwks_url,
            auth_token_use: optional("AUTH_TOKEN_USE"),
            access_token_leeway_seconds: seconds_or("ACCESS_TOKEN_LEEWAY_SECONDS", 0),
            jwks_cache_ttl: Duration::from_secs(seconds_or("JWKS_CACHE_TTL_SECONDS", 3600)),
            jwks_refresh_cooldown: Duration::from_secs(seconds_or("JWKS_REFRESH_COOLDOWN_SECONDS", 10)),
            dependency_timeout: Duration::from_secs(seconds_or("DEPENDENCY_TIMEOUT_SECONDS", 5).max(1)),
            database_url: optional("DATABASE_URL"),
            notify_webhook_url,
            notify_topic: optional("NOTIFY_TOPIC").unwrap_or_else(|| "tasks".to_string()),
        })
    }
}
