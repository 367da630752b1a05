//! In-memory repository
//!
//! Single-process store used by tests and local runs without a database.
//! Revocations are never evicted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{revoked_token::RevokedToken, user::NewUser, user::User};
use crate::domain::repository::{TokenBlocklist, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    users: Vec<User>,
    last_user_id: i64,
    revoked: HashMap<Uuid, RevokedToken>,
}

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut state = self.state.write().await;

        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        state.last_user_id += 1;
        let created = User {
            user_id: UserId::new(state.last_user_id),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            created_at: Utc::now(),
        };
        state.users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let state = self.state.read().await;
        Ok(state.users.iter().any(|u| &u.email == email))
    }
}

impl TokenBlocklist for InMemoryAuthRepository {
    async fn revoke(&self, token: &RevokedToken) -> AuthResult<()> {
        let mut state = self.state.write().await;
        state.revoked.entry(token.jti).or_insert_with(|| token.clone());
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> AuthResult<bool> {
        Ok(self.state.read().await.revoked.contains_key(&jti))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };

    fn new_user(email: &str) -> NewUser {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        NewUser {
            user_name: UserName::new("someone").unwrap(),
            email: Email::new(email).unwrap(),
            password: UserPassword::from_raw(&raw, None).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = InMemoryAuthRepository::new();
        let a = repo.create(&new_user("a@example.com")).await.unwrap();
        let b = repo.create(&new_user("b@example.com")).await.unwrap();
        assert_eq!(a.user_id, UserId::new(1));
        assert_eq!(b.user_id, UserId::new(2));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryAuthRepository::new();
        repo.create(&new_user("a@example.com")).await.unwrap();
        let err = repo.create(&new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_clones_share_revocations() {
        let repo = InMemoryAuthRepository::new();
        let other_handle = repo.clone();
        let jti = Uuid::new_v4();
        repo.revoke(&RevokedToken {
            jti,
            user_id: UserId::new(1),
            expires_at: Utc::now(),
        })
        .await
        .unwrap();
        assert!(other_handle.is_revoked(jti).await.unwrap());
        assert!(!other_handle.is_revoked(Uuid::new_v4()).await.unwrap());
    }
}
