//! Tournament Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Resources
//! - Events own entrants and matches; deleting an event removes both
//! - Entrants referenced by a match are never hard-deleted, only dropped
//! - Match winners must occupy one of the two slots
//!
//! Write routes are guarded by `auth::require_auth`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{TournamentError, TournamentResult};
pub use infra::{InMemoryTournamentRepository, PgTournamentRepository};
pub use presentation::{TournamentAppState, tournament_router, tournament_router_generic};

#[cfg(test)]
mod tests;
