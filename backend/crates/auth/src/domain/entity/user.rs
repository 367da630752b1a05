//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_name::UserName, user_password::UserPassword};

/// A validated signup, not yet persisted (the id is assigned by the store)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub password: UserPassword,
}

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    /// Unique, lower-cased
    pub email: Email,
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Greeting returned by the protected diagnostic route
    pub fn greeting(&self) -> String {
        format!("Hello {}!", self.user_name)
    }
}
