//! Log Out Use Case
//!
//! Revokes the token the request was authenticated with.

use std::sync::Arc;

use crate::application::check_token::AuthenticatedUser;
use crate::domain::entity::revoked_token::RevokedToken;
use crate::domain::repository::TokenBlocklist;
use crate::error::AuthResult;

pub struct LogOutUseCase<B>
where
    B: TokenBlocklist,
{
    blocklist: Arc<B>,
}

impl<B> LogOutUseCase<B>
where
    B: TokenBlocklist,
{
    pub fn new(blocklist: Arc<B>) -> Self {
        Self { blocklist }
    }

    pub async fn execute(&self, current: &AuthenticatedUser) -> AuthResult<()> {
        self.blocklist
            .revoke(&RevokedToken {
                jti: current.jti,
                user_id: current.user_id,
                expires_at: current.expires_at,
            })
            .await?;

        tracing::info!(user_id = %current.user_id, jti = %current.jti, "User logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use kernel::id::UserId;
    use uuid::Uuid;

    use super::*;
    use crate::infra::memory::InMemoryAuthRepository;

    #[tokio::test]
    async fn test_log_out_revokes_jti() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let current = AuthenticatedUser {
            user_id: UserId::new(1),
            jti: Uuid::new_v4(),
            expires_at: Utc::now() + Duration::minutes(15),
        };

        let uc = LogOutUseCase::new(repo.clone());
        uc.execute(&current).await.unwrap();
        assert!(repo.is_revoked(current.jti).await.unwrap());

        // Logging out twice is harmless
        uc.execute(&current).await.unwrap();
    }
}
