//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and token service
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Signup with username + email + password
//! - Login with email + password, returning a short-lived JWT access token
//! - Logout by revoking the current token's `jti`
//! - `require_auth` middleware for other crates' protected routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - HS256 tokens, zero clock leeway
//! - Revocations live in a shared store, not in process memory

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthenticatedUser, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::{
    AuthAppState, AuthMiddlewareState, auth_router, auth_router_generic, require_auth,
};
