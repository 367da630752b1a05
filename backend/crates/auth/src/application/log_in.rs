//! Log In Use Case
//!
//! Exchanges email + password for an access token.

use std::sync::Arc;

use crate::application::access_token::TokenService;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LogInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct LogInOutput {
    pub access_token: String,
}

pub struct LogInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> LogInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    /// Every credential problem (unknown email, malformed email, wrong or
    /// unusable password) is reported as `InvalidCredentials`.
    pub async fn execute(&self, input: LogInInput) -> AuthResult<LogInOutput> {
        let (Some(email), Some(password)) = (input.email, input.password) else {
            return Err(AuthError::InvalidCredentials);
        };

        let email = Email::new(&email).map_err(|_| AuthError::InvalidCredentials)?;
        let password = RawPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue(user.user_id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, jti = %issued.claims.jti, "User logged in");

        Ok(LogInOutput {
            access_token: issued.token,
        })
    }
}
