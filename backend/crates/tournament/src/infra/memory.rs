//! In-memory repository
//!
//! Single-process store used by tests and local runs without a database.
//! Enforces the same integrity rules as the PostgreSQL schema: matches and
//! entrants belong to an existing event, a match only refers to entrants of
//! its own event, match slots are distinct.

use std::sync::Arc;

use kernel::id::{EntrantId, EventId, MatchId};
use tokio::sync::RwLock;

use crate::domain::entities::{
    Entrant, EntrantRemoval, Event, EventSummary, Match, NewEntrant, NewEvent, NewMatch,
};
use crate::domain::repository::{EntrantRepository, EventRepository, MatchRepository};
use crate::error::{TournamentError, TournamentResult};

#[derive(Default)]
struct State {
    events: Vec<Event>,
    entrants: Vec<Entrant>,
    matches: Vec<Match>,
    last_event_id: i64,
    last_entrant_id: i64,
    last_match_id: i64,
}

impl State {
    fn summary(&self, event: &Event) -> EventSummary {
        let entrant_count = self
            .entrants
            .iter()
            .filter(|e| e.event_id == event.id)
            .count() as i64;
        EventSummary {
            event: event.clone(),
            entrant_count,
        }
    }

    fn has_event(&self, id: EventId) -> bool {
        self.events.iter().any(|e| e.id == id)
    }

    /// Mirrors the `matches` foreign keys and distinct-slot CHECK
    fn check_match_refs(
        &self,
        event_id: EventId,
        same_entrants: bool,
        refs: impl Iterator<Item = EntrantId>,
    ) -> TournamentResult<()> {
        if same_entrants {
            return Err(TournamentError::SameEntrant);
        }
        for id in refs {
            match self.entrants.iter().find(|e| e.id == id) {
                None => return Err(TournamentError::EntrantNotFound),
                Some(e) if e.event_id != event_id => {
                    return Err(TournamentError::EntrantOutsideEvent);
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTournamentRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventRepository for InMemoryTournamentRepository {
    async fn create_event(&self, event: &NewEvent) -> TournamentResult<Event> {
        let mut state = self.state.write().await;

        state.last_event_id += 1;
        let created = Event {
            id: EventId::new(state.last_event_id),
            name: event.name.clone(),
            date: event.date.clone(),
            rules: event.rules.clone(),
            status: event.status,
        };
        state.events.push(created.clone());

        Ok(created)
    }

    async fn list_events(&self) -> TournamentResult<Vec<EventSummary>> {
        let state = self.state.read().await;
        let mut events: Vec<EventSummary> =
            state.events.iter().map(|e| state.summary(e)).collect();
        events.sort_by(EventSummary::listing_order);
        Ok(events)
    }

    async fn find_event(&self, id: EventId) -> TournamentResult<Option<EventSummary>> {
        let state = self.state.read().await;
        Ok(state
            .events
            .iter()
            .find(|e| e.id == id)
            .map(|e| state.summary(e)))
    }

    async fn update_event(&self, event: &Event) -> TournamentResult<bool> {
        let mut state = self.state.write().await;
        match state.events.iter_mut().find(|e| e.id == event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_event(&self, id: EventId) -> TournamentResult<bool> {
        let mut state = self.state.write().await;
        if !state.has_event(id) {
            return Ok(false);
        }
        state.matches.retain(|m| m.event_id != id);
        state.entrants.retain(|e| e.event_id != id);
        state.events.retain(|e| e.id != id);
        Ok(true)
    }
}

impl EntrantRepository for InMemoryTournamentRepository {
    async fn create_entrant(&self, entrant: &NewEntrant) -> TournamentResult<Entrant> {
        let mut state = self.state.write().await;
        if !state.has_event(entrant.event_id) {
            return Err(TournamentError::EventNotFound);
        }

        state.last_entrant_id += 1;
        let created = Entrant {
            id: EntrantId::new(state.last_entrant_id),
            event_id: entrant.event_id,
            name: entrant.name.clone(),
            alias: entrant.alias.clone(),
            dropped: entrant.dropped,
        };
        state.entrants.push(created.clone());

        Ok(created)
    }

    async fn list_entrants(&self, event_id: Option<EventId>) -> TournamentResult<Vec<Entrant>> {
        let state = self.state.read().await;
        Ok(state
            .entrants
            .iter()
            .filter(|e| event_id.is_none_or(|id| e.event_id == id))
            .cloned()
            .collect())
    }

    async fn find_entrant(&self, id: EntrantId) -> TournamentResult<Option<Entrant>> {
        let state = self.state.read().await;
        Ok(state.entrants.iter().find(|e| e.id == id).cloned())
    }

    async fn find_entrants_by_ids(&self, ids: &[EntrantId]) -> TournamentResult<Vec<Entrant>> {
        let state = self.state.read().await;
        Ok(state
            .entrants
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn update_entrant(&self, entrant: &Entrant) -> TournamentResult<bool> {
        let mut state = self.state.write().await;
        match state.entrants.iter_mut().find(|e| e.id == entrant.id) {
            Some(stored) => {
                stored.name = entrant.name.clone();
                stored.alias = entrant.alias.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn retire_entrant(&self, id: EntrantId) -> TournamentResult<Option<EntrantRemoval>> {
        // One write guard for the whole check-then-act
        let mut state = self.state.write().await;

        let Some(pos) = state.entrants.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let referenced = state.matches.iter().any(|m| m.references(id));

        let removal = state.entrants[pos].clone().retire(referenced);
        match &removal {
            EntrantRemoval::Destroy => {
                state.entrants.remove(pos);
            }
            EntrantRemoval::Dropped(entrant) => {
                state.entrants[pos] = entrant.clone();
            }
        }

        Ok(Some(removal))
    }
}

impl MatchRepository for InMemoryTournamentRepository {
    async fn create_match(&self, record: &NewMatch) -> TournamentResult<Match> {
        let mut state = self.state.write().await;
        if !state.has_event(record.event_id) {
            return Err(TournamentError::EventNotFound);
        }
        state.check_match_refs(
            record.event_id,
            record.has_same_entrants(),
            record.entrant_refs(),
        )?;

        state.last_match_id += 1;
        let created = Match {
            id: MatchId::new(state.last_match_id),
            event_id: record.event_id,
            round: record.round,
            entrant1_id: record.entrant1_id,
            entrant2_id: record.entrant2_id,
            scores: record.scores.clone(),
            winner_id: record.winner_id,
        };
        state.matches.push(created.clone());

        Ok(created)
    }

    async fn list_matches(&self, event_id: Option<EventId>) -> TournamentResult<Vec<Match>> {
        let state = self.state.read().await;
        Ok(state
            .matches
            .iter()
            .filter(|m| event_id.is_none_or(|id| m.event_id == id))
            .cloned()
            .collect())
    }

    async fn find_match(&self, id: MatchId) -> TournamentResult<Option<Match>> {
        let state = self.state.read().await;
        Ok(state.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn update_match(&self, record: &Match) -> TournamentResult<bool> {
        let mut state = self.state.write().await;
        // event_id is fixed
        let Some(event_id) = state
            .matches
            .iter()
            .find(|m| m.id == record.id)
            .map(|m| m.event_id)
        else {
            return Ok(false);
        };
        state.check_match_refs(event_id, record.has_same_entrants(), record.entrant_refs())?;

        match state.matches.iter_mut().find(|m| m.id == record.id) {
            Some(stored) => {
                *stored = Match {
                    event_id,
                    ..record.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_match(&self, id: MatchId) -> TournamentResult<bool> {
        let mut state = self.state.write().await;
        let before = state.matches.len();
        state.matches.retain(|m| m.id != id);
        Ok(state.matches.len() != before)
    }
}
