//! Seed Use Case
//!
//! Development fixtures. Records go through the regular create use cases,
//! so a seed file obeys the same rules as API clients. Ids in the file are
//! local labels; the store assigns the real ids and references are
//! translated while loading.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{EntrantId, EventId};
use kernel::serde_ext::LenientInt;
use serde::Deserialize;

use crate::application::entrant::{CreateEntrantInput, EntrantUseCase};
use crate::application::event::{CreateEventInput, EventUseCase};
use crate::application::matches::{CreateMatchInput, MatchUseCase};
use crate::domain::repository::{EntrantRepository, EventRepository, MatchRepository};
use crate::error::{TournamentError, TournamentResult};

#[derive(Debug, Clone, Deserialize)]
pub struct SeedEvent {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntrant {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub dropped: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedMatch {
    pub event_id: i64,
    #[serde(default)]
    pub round: Option<i64>,
    pub entrant1_id: i64,
    pub entrant2_id: i64,
    #[serde(default)]
    pub scores: Option<String>,
    #[serde(default)]
    pub winner_id: Option<i64>,
}

/// シードファイル全体（`{"events": [...], "entrants": [...], "matches": [...]}`）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub events: Vec<SeedEvent>,
    #[serde(default)]
    pub entrants: Vec<SeedEntrant>,
    #[serde(default)]
    pub matches: Vec<SeedMatch>,
}

impl SeedData {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Records created by one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub events: usize,
    pub entrants: usize,
    pub matches: usize,
}

fn unknown_label(kind: &str, label: i64) -> TournamentError {
    TournamentError::InvalidField(format!("Seed refers to unknown {kind} {label}"))
}

fn lookup<T: Copy>(labels: &HashMap<i64, T>, kind: &str, label: i64) -> TournamentResult<T> {
    labels
        .get(&label)
        .copied()
        .ok_or_else(|| unknown_label(kind, label))
}

pub struct SeedUseCase<R>
where
    R: EventRepository + EntrantRepository + MatchRepository,
{
    repo: Arc<R>,
    events: EventUseCase<R>,
    entrants: EntrantUseCase<R>,
    matches: MatchUseCase<R>,
}

impl<R> SeedUseCase<R>
where
    R: EventRepository + EntrantRepository + MatchRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            events: EventUseCase::new(repo.clone()),
            entrants: EntrantUseCase::new(repo.clone()),
            matches: MatchUseCase::new(repo.clone()),
            repo,
        }
    }

    /// Delete every event; entrants and matches go with their event.
    /// Returns the number of events removed. Id sequences are not reset.
    pub async fn reset(&self) -> TournamentResult<usize> {
        let events = self.repo.list_events().await?;
        let mut removed = 0;
        for summary in events {
            if self.repo.delete_event(summary.event.id).await? {
                removed += 1;
            }
        }

        tracing::info!(events = removed, "Tournament data cleared");
        Ok(removed)
    }

    /// Insert events, then entrants, then matches.
    ///
    /// Not atomic: a failing record leaves the earlier ones in place, so
    /// a reload should start with [`SeedUseCase::reset`].
    pub async fn load(&self, data: &SeedData) -> TournamentResult<SeedReport> {
        let mut event_ids: HashMap<i64, EventId> = HashMap::new();
        for seed in &data.events {
            let created = self
                .events
                .create(CreateEventInput {
                    name: Some(seed.name.clone()),
                    date: seed.date.clone(),
                    rules: seed.rules.clone(),
                    status: seed.status.clone(),
                })
                .await?;
            if event_ids.insert(seed.id, created.event.id).is_some() {
                return Err(TournamentError::InvalidField(format!(
                    "Duplicate seed event {}",
                    seed.id
                )));
            }
        }

        let mut entrant_ids: HashMap<i64, EntrantId> = HashMap::new();
        for seed in &data.entrants {
            let event_id = lookup(&event_ids, "event", seed.event_id)?;
            let created = self
                .entrants
                .create(CreateEntrantInput {
                    name: Some(seed.name.clone()),
                    alias: seed.alias.clone(),
                    event_id: Some(LenientInt::Number(event_id.get())),
                    dropped: Some(seed.dropped),
                })
                .await?;
            if entrant_ids.insert(seed.id, created.id).is_some() {
                return Err(TournamentError::InvalidField(format!(
                    "Duplicate seed entrant {}",
                    seed.id
                )));
            }
        }

        let entrant_ref = |label: i64| -> TournamentResult<Option<LenientInt>> {
            let id = lookup(&entrant_ids, "entrant", label)?;
            Ok(Some(LenientInt::Number(id.get())))
        };
        for seed in &data.matches {
            let event_id = lookup(&event_ids, "event", seed.event_id)?;
            self.matches
                .create(CreateMatchInput {
                    event_id: Some(LenientInt::Number(event_id.get())),
                    entrant1_id: entrant_ref(seed.entrant1_id)?,
                    entrant2_id: entrant_ref(seed.entrant2_id)?,
                    round: seed.round.map(LenientInt::Number),
                    scores: seed.scores.clone(),
                    winner_id: seed.winner_id.map(entrant_ref).transpose()?.flatten(),
                })
                .await?;
        }

        let report = SeedReport {
            events: event_ids.len(),
            entrants: entrant_ids.len(),
            matches: data.matches.len(),
        };
        tracing::info!(
            events = report.events,
            entrants = report.entrants,
            matches = report.matches,
            "Seed data loaded"
        );
        Ok(report)
    }
}
