//! Application Layer
//!
//! Use cases for events, entrants and matches, plus development seeding.

pub mod entrant;
pub mod event;
pub mod matches;
pub mod seed;

// Re-exports
pub use entrant::{CreateEntrantInput, EntrantUseCase, UpdateEntrantInput};
pub use event::{CreateEventInput, EventUseCase, UpdateEventInput};
pub use matches::{CreateMatchInput, MatchUseCase, UpdateMatchInput};
pub use seed::{SeedData, SeedReport, SeedUseCase};
