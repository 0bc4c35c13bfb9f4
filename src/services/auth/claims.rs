use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Claims of a token that passed signature, audience, issuer and time checks.
///
/// Lives only for the authorization decision of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    pub(crate) fn new(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.get("exp")
            .and_then(Value::as_i64)
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}
