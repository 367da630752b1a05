//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::entity::{revoked_token::RevokedToken, user::NewUser, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user. Fails with `AuthError::EmailTaken` if the email exists.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Revocation store for access tokens
///
/// Shared by every worker that validates tokens; an implementation must make
/// a revocation visible to all of them.
#[trait_variant::make(TokenBlocklist: Send)]
pub trait LocalTokenBlocklist {
    /// Record a revocation. Revoking the same `jti` twice is not an error.
    async fn revoke(&self, token: &RevokedToken) -> AuthResult<()>;

    async fn is_revoked(&self, jti: Uuid) -> AuthResult<bool>;
}
