/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{HttpJwksSource, JwksCache, TokenVerifier};

pub fn build_token_verifier(config: &Config) -> Result<Arc<TokenVerifier>, AppError> {
    let source = HttpJwksSource::new(config.auth_jwks_url.as_str(), config.dependency_timeout)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to build key set client");
            AppError::Internal
        })?;

    let keys = JwksCache::new(
        Arc::new(source),
        config.jwks_cache_ttl,
        config.dependency_timeout,
    )
    .with_refresh_cooldown(config.jwks_refresh_cooldown);

    let verifier = TokenVerifier::new(
        keys,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
        config.auth_token_use.clone(),
    );

    Ok(Arc::new(verifier))
}
