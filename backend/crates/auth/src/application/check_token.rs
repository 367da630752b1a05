//! Check Token Use Case
//!
//! Validates the bearer token of a request: signature, expiry, and the
//! revocation store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use uuid::Uuid;

use crate::application::access_token::TokenService;
use crate::domain::repository::TokenBlocklist;
use crate::error::{AuthError, AuthResult};

/// Identity of the caller, inserted into request extensions by `require_auth`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub jti: Uuid,
    pub expires_at: DateTime<Utc>,
}

pub struct CheckTokenUseCase<B>
where
    B: TokenBlocklist,
{
    blocklist: Arc<B>,
    tokens: Arc<TokenService>,
}

impl<B> CheckTokenUseCase<B>
where
    B: TokenBlocklist,
{
    pub fn new(blocklist: Arc<B>, tokens: Arc<TokenService>) -> Self {
        Self { blocklist, tokens }
    }

    /// Check the raw `Authorization` header value
    pub async fn execute(&self, authorization: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let header = authorization.ok_or(AuthError::MissingAuthorizationHeader)?;

        let Some(token) = header.strip_prefix("Bearer ").map(str::trim) else {
            tracing::debug!("Authorization header is not a bearer token");
            return Err(AuthError::InvalidToken);
        };

        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(reason = %e, "Rejected access token");
            AuthError::InvalidToken
        })?;

        let (Some(user_id), Some(expires_at)) = (claims.user_id(), claims.expires_at()) else {
            tracing::debug!("Access token has unusable claims");
            return Err(AuthError::InvalidToken);
        };

        if self.blocklist.is_revoked(claims.jti).await? {
            tracing::debug!(jti = %claims.jti, "Rejected revoked access token");
            return Err(AuthError::InvalidToken);
        }

        Ok(AuthenticatedUser {
            user_id,
            jti: claims.jti,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::entity::revoked_token::RevokedToken;
    use crate::domain::repository::TokenBlocklist;
    use crate::infra::memory::InMemoryAuthRepository;

    fn setup() -> (
        CheckTokenUseCase<InMemoryAuthRepository>,
        Arc<InMemoryAuthRepository>,
        Arc<TokenService>,
    ) {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let tokens = Arc::new(TokenService::new(&AuthConfig::new("test")));
        (
            CheckTokenUseCase::new(repo.clone(), tokens.clone()),
            repo,
            tokens,
        )
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (uc, _, _) = setup();
        let err = uc.execute(None).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingAuthorizationHeader));
    }

    #[tokio::test]
    async fn test_structurally_invalid_token() {
        let (uc, _, _) = setup();
        for header in ["Bearer not.a.jwt", "Token abc", "Bearer ", "Basic dXNlcjpwYXNz"] {
            let err = uc.execute(Some(header)).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidToken), "{header}");
        }
    }

    #[tokio::test]
    async fn test_valid_token() {
        let (uc, _, tokens) = setup();
        let issued = tokens.issue(UserId::new(3)).unwrap();
        let user = uc
            .execute(Some(&format!("Bearer {}", issued.token)))
            .await
            .unwrap();
        assert_eq!(user.user_id, UserId::new(3));
        assert_eq!(user.jti, issued.claims.jti);
    }

    #[tokio::test]
    async fn test_expired_token() {
        let (uc, _, tokens) = setup();
        let issued = tokens
            .issue_at(UserId::new(3), Utc::now() - Duration::minutes(30))
            .unwrap();
        let err = uc
            .execute(Some(&format!("Bearer {}", issued.token)))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_revoked_token() {
        let (uc, repo, tokens) = setup();
        let issued = tokens.issue(UserId::new(3)).unwrap();
        repo.revoke(&RevokedToken {
            jti: issued.claims.jti,
            user_id: UserId::new(3),
            expires_at: Utc::now() + Duration::minutes(15),
        })
        .await
        .unwrap();

        let err = uc
            .execute(Some(&format!("Bearer {}", issued.token)))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
