//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{revoked_token::RevokedToken, user::NewUser, user::User};
pub use repository::{TokenBlocklist, UserRepository};
