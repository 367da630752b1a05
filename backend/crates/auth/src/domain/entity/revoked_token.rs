//! Revoked Token Entity
//!
//! An access token that was logged out before it expired.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokedToken {
    /// `jti` claim of the token
    pub jti: Uuid,
    pub user_id: UserId,
    /// `exp` claim of the token; after this the row is no longer needed
    pub expires_at: DateTime<Utc>,
}
