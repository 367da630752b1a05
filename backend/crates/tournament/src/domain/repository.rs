//! Repository Traits
//!
//! Method names carry the entity so that one store can implement all three
//! traits without ambiguity.

use kernel::id::{EntrantId, EventId, MatchId};

use crate::domain::entities::{
    Entrant, EntrantRemoval, Event, EventSummary, Match, NewEntrant, NewEvent, NewMatch,
};
use crate::error::TournamentResult;

#[trait_variant::make(EventRepository: Send)]
pub trait LocalEventRepository {
    async fn create_event(&self, event: &NewEvent) -> TournamentResult<Event>;

    /// All events with entrant counts, sorted by `EventSummary::listing_order`
    async fn list_events(&self) -> TournamentResult<Vec<EventSummary>>;

    async fn find_event(&self, id: EventId) -> TournamentResult<Option<EventSummary>>;

    /// Persist changed fields. Returns `false` if the event no longer exists.
    async fn update_event(&self, event: &Event) -> TournamentResult<bool>;

    /// Delete the event with its entrants and matches, atomically.
    /// Returns `false` if it did not exist.
    async fn delete_event(&self, id: EventId) -> TournamentResult<bool>;
}

#[trait_variant::make(EntrantRepository: Send)]
pub trait LocalEntrantRepository {
    async fn create_entrant(&self, entrant: &NewEntrant) -> TournamentResult<Entrant>;

    /// Entrants ordered by id, optionally limited to one event
    async fn list_entrants(&self, event_id: Option<EventId>) -> TournamentResult<Vec<Entrant>>;

    async fn find_entrant(&self, id: EntrantId) -> TournamentResult<Option<Entrant>>;

    /// Look up several entrants at once; unknown ids are skipped
    async fn find_entrants_by_ids(&self, ids: &[EntrantId]) -> TournamentResult<Vec<Entrant>>;

    async fn update_entrant(&self, entrant: &Entrant) -> TournamentResult<bool>;

    /// Run `Entrant::retire` and persist its outcome in one atomic step.
    /// Returns `None` if the entrant does not exist.
    async fn retire_entrant(&self, id: EntrantId) -> TournamentResult<Option<EntrantRemoval>>;
}

#[trait_variant::make(MatchRepository: Send)]
pub trait LocalMatchRepository {
    /// Fails with `SameEntrant` when both slots hold the same entrant
    async fn create_match(&self, record: &NewMatch) -> TournamentResult<Match>;

    /// Matches ordered by id, optionally limited to one event
    async fn list_matches(&self, event_id: Option<EventId>) -> TournamentResult<Vec<Match>>;

    async fn find_match(&self, id: MatchId) -> TournamentResult<Option<Match>>;

    /// Fails with `SameEntrant` like `create_match`
    async fn update_match(&self, record: &Match) -> TournamentResult<bool>;

    async fn delete_match(&self, id: MatchId) -> TournamentResult<bool>;
}
