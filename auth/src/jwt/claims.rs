use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::errors::JwtError;

/// Untyped JWT payload.
///
/// Only the expiry is modelled as a field. Everything else travels in a flat
/// key/value map so that every token type can share one codec; callers decide
/// which keys they expect.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Remaining claims (flattened into token)
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim value.
    pub fn with(mut self, key: impl ToString, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Read a string claim.
    ///
    /// # Errors
    /// * `MissingClaim` - Key absent
    /// * `InvalidClaim` - Value is not a string
    pub fn get_str(&self, key: &str) -> Result<&str, JwtError> {
        self.values
            .get(key)
            .ok_or_else(|| JwtError::MissingClaim(key.to_string()))?
            .as_str()
            .ok_or_else(|| JwtError::InvalidClaim(key.to_string()))
    }

    /// Read a boolean claim.
    ///
    /// # Errors
    /// * `MissingClaim` - Key absent
    /// * `InvalidClaim` - Value is not a boolean
    pub fn get_bool(&self, key: &str) -> Result<bool, JwtError> {
        self.values
            .get(key)
            .ok_or_else(|| JwtError::MissingClaim(key.to_string()))?
            .as_bool()
            .ok_or_else(|| JwtError::InvalidClaim(key.to_string()))
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// Claims without `exp` never validate, so they count as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| exp < current_timestamp)
    }
}
