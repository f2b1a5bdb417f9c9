use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

const USER_ID: &str = "userId";
const USER_NAME: &str = "userName";
const IS_ADMIN: &str = "isAdmin";
const TOKEN_TYPE: &str = "tokenType";

/// Which of the two bearer tokens a claim set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity a token pair is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: String,
    pub user_name: String,
    pub is_admin: bool,
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Claims carried by a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub user_id: String,
    pub user_name: String,
    pub is_admin: bool,
    pub expires_at: DateTime<Utc>,
}

/// Claims carried by a validated refresh token.
///
/// Only the subject: names and roles are always re-read from the user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshClaims {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

/// How long issued tokens stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::hours(24),
        }
    }
}

/// Token lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Failed to sign {token_type} token: {source}")]
    Signing {
        token_type: TokenType,
        source: JwtError,
    },

    #[error("Invalid {token_type} token: {source}")]
    InvalidToken {
        token_type: TokenType,
        source: JwtError,
    },
}

/// Issues and validates access/refresh token pairs.
///
/// A token is only trusted once its signature checks out, it has not expired
/// according to the injected clock, and its `tokenType` claim matches the
/// kind of token the caller asked for.
pub struct Authenticator {
    jwt_handler: JwtHandler,
    clock: Arc<dyn Clock>,
    lifetimes: TokenLifetimes,
}

impl Authenticator {
    /// Create an authenticator with the wall clock and default lifetimes
    /// (15 minutes access, 24 hours refresh).
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            jwt_handler: JwtHandler::new(jwt_secret),
            clock: Arc::new(SystemClock),
            lifetimes: TokenLifetimes::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_lifetimes(mut self, lifetimes: TokenLifetimes) -> Self {
        self.lifetimes = lifetimes;
        self
    }

    /// Sign a fresh access + refresh token pair for `subject`.
    ///
    /// Either both tokens are returned or none is.
    ///
    /// # Errors
    /// * `Signing` - Either token failed to sign
    pub fn issue_tokens(&self, subject: &TokenSubject) -> Result<TokenPair, AuthenticationError> {
        let now = self.clock.now();

        let access_claims = Claims::new()
            .with(USER_ID, subject.user_id.as_str())
            .with(USER_NAME, subject.user_name.as_str())
            .with(IS_ADMIN, subject.is_admin)
            .with(TOKEN_TYPE, TokenType::Access.as_str());
        let access_token = self.sign(
            TokenType::Access,
            &access_claims,
            now + self.lifetimes.access,
        )?;

        let refresh_claims = Claims::new()
            .with(USER_ID, subject.user_id.as_str())
            .with(TOKEN_TYPE, TokenType::Refresh.as_str());
        let refresh_token = self.sign(
            TokenType::Refresh,
            &refresh_claims,
            now + self.lifetimes.refresh,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate an access token and extract its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, structure, expiry, type or claims
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthenticationError> {
        let token_type = TokenType::Access;
        let invalid = |source: JwtError| AuthenticationError::InvalidToken { token_type, source };

        let (claims, expires_at) = self.validated_claims(token, token_type).map_err(invalid)?;

        Ok(AccessClaims {
            user_id: claims.get_str(USER_ID).map_err(invalid)?.to_string(),
            user_name: claims.get_str(USER_NAME).map_err(invalid)?.to_string(),
            is_admin: claims.get_bool(IS_ADMIN).map_err(invalid)?,
            expires_at,
        })
    }

    /// Validate a refresh token and extract its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, structure, expiry, type or claims
    pub fn validate_refresh_token(
        &self,
        token: &str,
    ) -> Result<RefreshClaims, AuthenticationError> {
        let token_type = TokenType::Refresh;
        let invalid = |source: JwtError| AuthenticationError::InvalidToken { token_type, source };

        let (claims, expires_at) = self.validated_claims(token, token_type).map_err(invalid)?;

        Ok(RefreshClaims {
            user_id: claims.get_str(USER_ID).map_err(invalid)?.to_string(),
            expires_at,
        })
    }

    fn sign(
        &self,
        token_type: TokenType,
        claims: &Claims,
        expiry: DateTime<Utc>,
    ) -> Result<String, AuthenticationError> {
        self.jwt_handler
            .new_signed_token(claims, expiry)
            .map_err(|source| AuthenticationError::Signing { token_type, source })
    }

    fn validated_claims(
        &self,
        token: &str,
        token_type: TokenType,
    ) -> Result<(Claims, DateTime<Utc>), JwtError> {
        let claims = self.jwt_handler.parse(token)?;

        if self.jwt_handler.is_expired(&claims, self.clock.now()) {
            return Err(JwtError::TokenExpired);
        }

        if claims.get_str(TOKEN_TYPE)? != token_type.as_str() {
            return Err(JwtError::InvalidClaim(TOKEN_TYPE.to_string()));
        }

        let expires_at = claims
            .exp
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
            .ok_or_else(|| JwtError::InvalidClaim("exp".to_string()))?;

        Ok((claims, expires_at))
    }
}
