//! Domain Entities
//!
//! Events own entrants and matches. Ids are assigned by the store, so each
//! entity has a `New*` form used before insertion.

use std::cmp::Ordering;

use kernel::id::{EntrantId, EventId, MatchId};

use crate::domain::value_objects::{EntrantAlias, EntrantName, EventName, EventStatus};
use crate::error::{TournamentError, TournamentResult};

// ============================================================================
// Event
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: EventName,
    /// Free text, as entered
    pub date: Option<String>,
    pub rules: Option<String>,
    pub status: EventStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub name: EventName,
    pub date: Option<String>,
    pub rules: Option<String>,
    pub status: EventStatus,
}

/// Allowed changes to an event. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub name: Option<EventName>,
    pub date: Option<Option<String>>,
    pub rules: Option<Option<String>>,
    pub status: Option<EventStatus>,
}

impl Event {
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(rules) = patch.rules {
            self.rules = rules;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// An event as listed, with its entrant count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub event: Event,
    pub entrant_count: i64,
}

impl EventSummary {
    /// Total order of the event listing:
    /// date descending (undated last), status priority, name, id.
    pub fn listing_order(a: &Self, b: &Self) -> Ordering {
        let (a, b) = (&a.event, &b.event);
        let by_date = match (&a.date, &b.date) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };

        by_date
            .then_with(|| a.status.priority().cmp(&b.status.priority()))
            .then_with(|| a.name.as_str().cmp(b.name.as_str()))
            .then_with(|| a.id.cmp(&b.id))
    }
}

// ============================================================================
// Entrant
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntrant {
    pub event_id: EventId,
    pub name: EntrantName,
    pub alias: Option<EntrantAlias>,
    pub dropped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrant {
    pub id: EntrantId,
    /// Fixed for the lifetime of the entrant
    pub event_id: EventId,
    pub name: EntrantName,
    pub alias: Option<EntrantAlias>,
    pub dropped: bool,
}

/// Allowed changes to an entrant. The owning event is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrantPatch {
    pub name: Option<EntrantName>,
    pub alias: Option<Option<EntrantAlias>>,
}

/// Outcome of deleting an entrant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrantRemoval {
    /// No match refers to the entrant; the record is removed
    Destroy,
    /// Matches refer to the entrant; the record is kept, anonymized
    Dropped(Entrant),
}

impl Entrant {
    pub fn apply(&mut self, patch: EntrantPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(alias) = patch.alias {
            self.alias = alias;
        }
    }

    /// Active -> Dropped transition.
    ///
    /// `referenced` is whether any match names this entrant in either slot
    /// or as winner.
    pub fn retire(self, referenced: bool) -> EntrantRemoval {
        if !referenced {
            return EntrantRemoval::Destroy;
        }
        EntrantRemoval::Dropped(Entrant {
            name: EntrantName::dropped(),
            alias: None,
            dropped: true,
            ..self
        })
    }
}

// ============================================================================
// Match
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub event_id: EventId,
    pub round: Option<i32>,
    pub entrant1_id: Option<EntrantId>,
    pub entrant2_id: Option<EntrantId>,
    pub scores: Option<String>,
    pub winner_id: Option<EntrantId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    /// Fixed for the lifetime of the match
    pub event_id: EventId,
    pub round: Option<i32>,
    pub entrant1_id: Option<EntrantId>,
    pub entrant2_id: Option<EntrantId>,
    pub scores: Option<String>,
    pub winner_id: Option<EntrantId>,
}

/// Allowed changes to a match. Each field is tri-state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPatch {
    pub round: Option<Option<i32>>,
    pub entrant1_id: Option<Option<EntrantId>>,
    pub entrant2_id: Option<Option<EntrantId>>,
    pub scores: Option<Option<String>>,
    pub winner_id: Option<Option<EntrantId>>,
}

/// Winner, when set, must occupy one of the two slots
fn check_winner(
    entrant1_id: Option<EntrantId>,
    entrant2_id: Option<EntrantId>,
    winner_id: Option<EntrantId>,
) -> TournamentResult<()> {
    match winner_id {
        Some(w) if Some(w) != entrant1_id && Some(w) != entrant2_id => {
            Err(TournamentError::WinnerNotAnEntrant)
        }
        _ => Ok(()),
    }
}

/// Both slots set to the same entrant
fn same_entrant(entrant1_id: Option<EntrantId>, entrant2_id: Option<EntrantId>) -> bool {
    matches!((entrant1_id, entrant2_id), (Some(a), Some(b)) if a == b)
}

impl NewMatch {
    pub fn validate_winner(&self) -> TournamentResult<()> {
        check_winner(self.entrant1_id, self.entrant2_id, self.winner_id)
    }

    pub fn has_same_entrants(&self) -> bool {
        same_entrant(self.entrant1_id, self.entrant2_id)
    }

    /// Entrant ids this match would point at
    pub fn entrant_refs(&self) -> impl Iterator<Item = EntrantId> {
        [self.entrant1_id, self.entrant2_id, self.winner_id]
            .into_iter()
            .flatten()
    }
}

impl Match {
    pub fn apply(&mut self, patch: MatchPatch) {
        if let Some(round) = patch.round {
            self.round = round;
        }
        if let Some(id) = patch.entrant1_id {
            self.entrant1_id = id;
        }
        if let Some(id) = patch.entrant2_id {
            self.entrant2_id = id;
        }
        if let Some(scores) = patch.scores {
            self.scores = scores;
        }
        if let Some(id) = patch.winner_id {
            self.winner_id = id;
        }
    }

    pub fn validate_winner(&self) -> TournamentResult<()> {
        check_winner(self.entrant1_id, self.entrant2_id, self.winner_id)
    }

    pub fn has_same_entrants(&self) -> bool {
        same_entrant(self.entrant1_id, self.entrant2_id)
    }

    pub fn entrant_refs(&self) -> impl Iterator<Item = EntrantId> {
        [self.entrant1_id, self.entrant2_id, self.winner_id]
            .into_iter()
            .flatten()
    }

    /// Whether the entrant appears in either slot or as winner
    pub fn references(&self, entrant_id: EntrantId) -> bool {
        self.entrant_refs().any(|id| id == entrant_id)
    }
}

/// A match with entrant names resolved for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchView {
    pub record: Match,
    pub entrant1_name: Option<String>,
    pub entrant2_name: Option<String>,
    pub winner_name: Option<String>,
}

/// An event with everything it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub summary: EventSummary,
    pub entrants: Vec<Entrant>,
    pub matches: Vec<MatchView>,
}
