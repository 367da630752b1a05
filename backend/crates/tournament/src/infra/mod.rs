//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryTournamentRepository;
pub use postgres::PgTournamentRepository;
