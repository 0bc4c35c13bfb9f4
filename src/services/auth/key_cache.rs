//! Process-wide cache of the provider's signing keys, indexed by `kid`.
//!
//! - Readers share an `RwLock`; only a refresh takes the write side.
//! - A miss (unknown kid) or an expired set triggers a refresh.
//! - Refreshes are single-flight: callers queue on one async mutex and, once inside,
//!   take the outcome of any attempt that finished while they waited (attempt counter).
//!   A failed attempt counts too, so an outage costs one fetch, not one per caller.
//! - At most one remote attempt per cooldown window; an unknown `kid` inside the
//!   window is answered from the current set.
//! - A failed refresh leaves the previous set in place but the caller is rejected.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet, KeyAlgorithm, PublicKeyUse};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::services::auth::jwks::{JwksError, JwksSource};

#[derive(Default)]
struct CachedKeys {
    keys: HashMap<String, Arc<DecodingKey>>,
    fetched_at: Option<Instant>,
    // bumped by every remote attempt, successful or not
    attempt: u64,
    attempted_at: Option<Instant>,
    last_failed: bool,
}

impl CachedKeys {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.is_some_and(|at| at.elapsed() < ttl)
    }

    fn in_cooldown(&self, cooldown: Duration) -> bool {
        self.attempted_at.is_some_and(|at| at.elapsed() < cooldown)
    }

    /// Answer from the outcome of the latest attempt without fetching.
    fn settled(&self, kid: &str) -> Result<Arc<DecodingKey>, JwksError> {
        if self.last_failed {
            return Err(JwksError::RefreshFailed);
        }
        self.keys
            .get(kid)
            .cloned()
            .ok_or_else(|| JwksError::UnknownKid(kid.to_string()))
    }
}

pub struct JwksCache {
    source: Arc<dyn JwksSource>,
    ttl: Duration,
    fetch_timeout: Duration,
    refresh_cooldown: Duration,
    state: RwLock<CachedKeys>,
    refresh: Mutex<()>,
}

impl std::fmt::Debug for JwksCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwksCache")
            .field("endpoint", &self.source.endpoint())
            .field("ttl", &self.ttl)
            .field("refresh_cooldown", &self.refresh_cooldown)
            .finish()
    }
}

impl JwksCache {
    pub fn new(source: Arc<dyn JwksSource>, ttl: Duration, fetch_timeout: Duration) -> Self {
        Self {
            source,
            ttl,
            fetch_timeout,
            refresh_cooldown: Duration::ZERO,
            state: RwLock::new(CachedKeys::default()),
            refresh: Mutex::new(()),
        }
    }

    /// Minimum spacing between remote attempts (default: none).
    pub fn with_refresh_cooldown(mut self, cooldown: Duration) -> Self {
        self.refresh_cooldown = cooldown;
        self
    }

    /// Resolve the verification key for `kid`, refreshing the set when needed.
    pub async fn key_for(&self, kid: &str) -> Result<Arc<DecodingKey>, JwksError> {
        let seen_attempt = {
            let state = self.state.read().await;
            if state.is_fresh(self.ttl)
                && let Some(key) = state.keys.get(kid)
            {
                return Ok(key.clone());
            }
            state.attempt
        };

        let _refresh = self.refresh.lock().await;

        {
            let state = self.state.read().await;
            if state.attempt != seen_attempt || state.in_cooldown(self.refresh_cooldown) {
                return state.settled(kid);
            }
        }

        let fetched = tokio::time::timeout(self.fetch_timeout, self.source.fetch())
            .await
            .map_err(|_| JwksError::Timeout)
            .and_then(|res| res);

        let mut state = self.state.write().await;
        state.attempt += 1;
        state.attempted_at = Some(Instant::now());

        match fetched {
            Ok(set) => {
                let keys = usable_keys(&set);
                info!(
                    endpoint = self.source.endpoint(),
                    keys = keys.len(),
                    "signing key set refreshed"
                );

                state.keys = keys;
                state.fetched_at = Some(Instant::now());
                state.last_failed = false;
                state.settled(kid)
            }
            Err(err) => {
                warn!(endpoint = self.source.endpoint(), error = %err, "signing key set refresh failed");
                state.last_failed = true;
                Err(err)
            }
        }
    }
}

/// RSA signature keys with a `kid` that are (or may be) used for RS256.
fn usable_keys(set: &JwkSet) -> HashMap<String, Arc<DecodingKey>> {
    set.keys
        .iter()
        .filter_map(|jwk| match admit(jwk) {
            Ok(entry) => Some(entry),
            Err(reason) => {
                debug!(kid = ?jwk.common.key_id, reason, "skipping published key");
                None
            }
        })
        .collect()
}

fn admit(jwk: &Jwk) -> Result<(String, Arc<DecodingKey>), &'static str> {
    let kid = jwk.common.key_id.clone().ok_or("missing kid")?;

    if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
        return Err("not an RSA key");
    }
    if !matches!(jwk.common.key_algorithm, None | Some(KeyAlgorithm::RS256)) {
        return Err("declared for another algorithm");
    }
    if !matches!(jwk.common.public_key_use, None | Some(PublicKeyUse::Signature)) {
        return Err("not a signature key");
    }

    let key = DecodingKey::from_jwk(jwk).map_err(|_| "undecodable key material")?;
    Ok((kid, Arc::new(key)))
}
