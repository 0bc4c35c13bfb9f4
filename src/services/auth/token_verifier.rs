use std::{error::Error as StdError, fmt};

use jsonwebtoken::{Algorithm, Validation};
use serde_json::{Map, Value};
use tracing::warn;

use crate::services::auth::claims::ClaimSet;
use crate::services::auth::jwks::JwksError;
use crate::services::auth::key_cache::JwksCache;

/// The only signature algorithm the identity provider uses.
pub const ALLOWED_ALGORITHM: Algorithm = Algorithm::RS256;

/// Uniform outcome for every verification failure.
///
/// The cause is logged by the verifier and never carried further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bearer token rejected")
    }
}

impl StdError for Rejected {}

// Internal causes, for logs only.
#[derive(Debug)]
enum VerifyError {
    EmptyToken,
    Malformed(jsonwebtoken::errors::Error),
    DisallowedAlgorithm(Algorithm),
    MissingKid,
    Keys(JwksError),
    Invalid(jsonwebtoken::errors::Error),
    TokenUse { expected: String, actual: Option<String> },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "empty bearer token"),
            Self::Malformed(e) => write!(f, "malformed token: {}", e),
            Self::DisallowedAlgorithm(alg) => write!(f, "disallowed algorithm {:?}", alg),
            Self::MissingKid => write!(f, "token header has no kid"),
            Self::Keys(e) => write!(f, "signing key unavailable: {}", e),
            Self::Invalid(e) => write!(f, "jwt verification failed: {}", e),
            Self::TokenUse { expected, actual } => {
                write!(f, "token_use {:?} (expected {:?})", actual, expected)
            }
        }
    }
}

impl From<JwksError> for VerifyError {
    fn from(e: JwksError) -> Self {
        Self::Keys(e)
    }
}

/// RS256 bearer-token verifier backed by the provider's published key set.
///
/// `jsonwebtoken::Validation` checks signature, `exp`, `nbf`, `iss` and `aud`;
/// the header algorithm is pinned before any key lookup happens.
#[derive(Debug)]
pub struct TokenVerifier {
    keys: JwksCache,
    validation: Validation,
    token_use: Option<String>,
}

impl TokenVerifier {
    pub fn new(
        keys: JwksCache,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
        token_use: Option<String>,
    ) -> Self {
        let mut validation = Validation::new(ALLOWED_ALGORITHM);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Self {
            keys,
            validation,
            token_use,
        }
    }

    pub async fn verify(&self, token: &str) -> Result<ClaimSet, Rejected> {
        match self.check(token).await {
            Ok(claims) => Ok(claims),
            Err(err) => {
                warn!(error = %err, "access token verification failed");
                Err(Rejected)
            }
        }
    }

    async fn check(&self, token: &str) -> Result<ClaimSet, VerifyError> {
        if token.trim().is_empty() {
            return Err(VerifyError::EmptyToken);
        }

        let header = jsonwebtoken::decode_header(token).map_err(VerifyError::Malformed)?;
        if header.alg != ALLOWED_ALGORITHM {
            return Err(VerifyError::DisallowedAlgorithm(header.alg));
        }
        let kid = header.kid.ok_or(VerifyError::MissingKid)?;

        let key = self.keys.key_for(&kid).await?;

        let data = jsonwebtoken::decode::<Map<String, Value>>(token, &key, &self.validation)
            .map_err(VerifyError::Invalid)?;
        let claims = ClaimSet::new(data.claims);

        if let Some(expected) = &self.token_use
            && claims.get_str("token_use") != Some(expected.as_str())
        {
            return Err(VerifyError::TokenUse {
                expected: expected.clone(),
                actual: claims.get_str("token_use").map(str::to_string),
            });
        }

        Ok(claims)
    }
}
