//! Greet Use Case
//!
//! Diagnostic for the protected route: resolves the caller to a user row.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct GreetUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GreetUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<String> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(user.greeting())
    }
}
