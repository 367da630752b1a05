//! Domain Layer
//!
//! Entities, value objects, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::*;
pub use repository::{EntrantRepository, EventRepository, MatchRepository};
pub use value_objects::{EntrantAlias, EntrantName, EventName, EventStatus};
