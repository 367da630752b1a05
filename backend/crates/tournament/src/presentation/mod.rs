//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::TournamentAppState;
pub use router::{tournament_router, tournament_router_generic};
