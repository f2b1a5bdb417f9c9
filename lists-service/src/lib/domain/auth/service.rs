use std::sync::Arc;

use auth::AccessClaims;
use auth::Authenticator;
use auth::RefreshClaims;
use auth::TokenPair;
use auth::TokenSubject;

use crate::domain::errors::AppError;
use crate::domain::user::models::User;
use crate::domain::user::service::UsersService;

/// Issues, validates and refreshes bearer tokens for users.
#[derive(Clone)]
pub struct AuthService {
    authenticator: Arc<Authenticator>,
    users: UsersService,
}

impl AuthService {
    /// # Arguments
    /// * `authenticator` - Token signer/validator (secret, clock and lifetimes)
    /// * `users` - Used to re-read the user on refresh
    pub fn new(authenticator: Arc<Authenticator>, users: UsersService) -> Self {
        Self {
            authenticator,
            users,
        }
    }

    /// Sign an access + refresh token pair for `user`.
    ///
    /// # Errors
    /// * `Unexpected` - Either token failed to sign; no token is returned
    pub fn issue_tokens(&self, user: &User) -> Result<TokenPair, AppError> {
        self.authenticator
            .issue_tokens(&TokenSubject::from(user))
            .map_err(|e| AppError::unexpected("Error creating jwt token", e))
    }

    /// Claims of a valid, unexpired access token.
    ///
    /// # Errors
    /// * `Unauthorized` - "Invalid token" whatever the reason
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.authenticator.validate_access_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            AppError::unauthorized("Invalid token", e)
        })
    }

    /// Claims of a valid, unexpired refresh token.
    ///
    /// # Errors
    /// * `Unauthorized` - "Invalid refresh token" whatever the reason
    pub fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        self.authenticator.validate_refresh_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            AppError::unauthorized("Invalid refresh token", e)
        })
    }

    /// Trade a refresh token for a new token pair.
    ///
    /// The user is read again so the new access token reflects its current
    /// name and admin flag.
    ///
    /// # Errors
    /// * `Unauthorized` - Invalid or expired refresh token
    /// * `NotFound` - The user no longer exists
    /// * `Unexpected` - Lookup or signing failed
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.validate_refresh_token(refresh_token)?;
        let user = self.users.get_single_user(&claims.user_id).await?;

        tracing::debug!(user_id = %user.id, "Refreshing tokens");

        self.issue_tokens(&user)
    }
}
