//! Signing-key set retrieval from the identity provider's discovery endpoint.
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JwksError {
    #[error("key set request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("key set endpoint unavailable: {0}")]
    Unavailable(String),
    #[error("key set request timed out")]
    Timeout,
    #[error("latest key set refresh failed")]
    RefreshFailed,
    #[error("no usable signing key with kid {0:?}")]
    UnknownKid(String),
}

/// Where the published key set comes from.
#[async_trait]
pub trait JwksSource: Send + Sync {
    fn endpoint(&self) -> &str;

    async fn fetch(&self) -> Result<JwkSet, JwksError>;
}

/// Fetches `/.well-known/jwks.json` over HTTPS.
#[derive(Clone, Debug)]
pub struct HttpJwksSource {
    client: reqwest::Client,
    url: String,
}

impl HttpJwksSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, JwksError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl JwksSource for HttpJwksSource {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        let res = self.client.get(&self.url).send().await?;
        if !res.status().is_success() {
            return Err(JwksError::Unavailable(format!("status {}", res.status())));
        }

        let set = res.json::<JwkSet>().await?;
        Ok(set)
    }
}
