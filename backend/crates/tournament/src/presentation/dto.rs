//! API DTOs (Data Transfer Objects)
//!
//! Update requests list exactly the patchable fields. Any other key in the
//! body (`id`, `entrant_count`, nested lists echoed back by a client) is
//! ignored.

use kernel::id::{EntrantId, EventId, MatchId};
use kernel::serde_ext::{LenientInt, deserialize_some};
use serde::{Deserialize, Serialize};

use crate::application::{
    CreateEntrantInput, CreateEventInput, CreateMatchInput, UpdateEntrantInput,
    UpdateEventInput, UpdateMatchInput,
};
use crate::domain::entities::{Entrant, EventDetail, EventSummary, MatchView};
use crate::domain::value_objects::EventStatus;

// ============================================================================
// Query
// ============================================================================

/// `?event_id=` filter for collection endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub event_id: Option<LenientInt>,
}

// ============================================================================
// Event
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<CreateEventRequest> for CreateEventInput {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            name: req.name,
            date: req.date,
            rules: req.rules,
            status: req.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub date: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub rules: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<String>>,
}

impl From<UpdateEventRequest> for UpdateEventInput {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            name: req.name,
            date: req.date,
            rules: req.rules,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: EventId,
    pub name: String,
    pub date: Option<String>,
    pub rules: Option<String>,
    pub status: EventStatus,
    pub entrant_count: i64,
}

impl From<EventSummary> for EventResponse {
    fn from(summary: EventSummary) -> Self {
        let event = summary.event;
        Self {
            id: event.id,
            name: event.name.as_str().to_string(),
            date: event.date,
            rules: event.rules,
            status: event.status,
            entrant_count: summary.entrant_count,
        }
    }
}

/// An event with its entrants and matches
#[derive(Debug, Clone, Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub entrants: Vec<EntrantResponse>,
    pub matches: Vec<MatchResponse>,
}

impl From<EventDetail> for EventDetailResponse {
    fn from(detail: EventDetail) -> Self {
        Self {
            event: detail.summary.into(),
            entrants: detail.entrants.into_iter().map(Into::into).collect(),
            matches: detail.matches.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Entrant
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateEntrantRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub event_id: Option<LenientInt>,
    #[serde(default)]
    pub dropped: Option<bool>,
}

impl From<CreateEntrantRequest> for CreateEntrantInput {
    fn from(req: CreateEntrantRequest) -> Self {
        Self {
            name: req.name,
            alias: req.alias,
            event_id: req.event_id,
            dropped: req.dropped,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntrantRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub alias: Option<Option<String>>,
}

impl From<UpdateEntrantRequest> for UpdateEntrantInput {
    fn from(req: UpdateEntrantRequest) -> Self {
        Self {
            name: req.name,
            alias: req.alias,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntrantResponse {
    pub id: EntrantId,
    pub name: String,
    pub alias: Option<String>,
    pub event_id: EventId,
    pub dropped: bool,
}

impl From<Entrant> for EntrantResponse {
    fn from(entrant: Entrant) -> Self {
        Self {
            id: entrant.id,
            name: entrant.name.as_str().to_string(),
            alias: entrant.alias.map(|a| a.as_str().to_string()),
            event_id: entrant.event_id,
            dropped: entrant.dropped,
        }
    }
}

// ============================================================================
// Match
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    #[serde(default)]
    pub event_id: Option<LenientInt>,
    #[serde(default)]
    pub entrant1_id: Option<LenientInt>,
    #[serde(default)]
    pub entrant2_id: Option<LenientInt>,
    #[serde(default)]
    pub round: Option<LenientInt>,
    #[serde(default)]
    pub scores: Option<String>,
    #[serde(default)]
    pub winner_id: Option<LenientInt>,
}

impl From<CreateMatchRequest> for CreateMatchInput {
    fn from(req: CreateMatchRequest) -> Self {
        Self {
            event_id: req.event_id,
            entrant1_id: req.entrant1_id,
            entrant2_id: req.entrant2_id,
            round: req.round,
            scores: req.scores,
            winner_id: req.winner_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMatchRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub round: Option<Option<LenientInt>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub entrant1_id: Option<Option<LenientInt>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub entrant2_id: Option<Option<LenientInt>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub scores: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub winner_id: Option<Option<LenientInt>>,
}

impl From<UpdateMatchRequest> for UpdateMatchInput {
    fn from(req: UpdateMatchRequest) -> Self {
        Self {
            round: req.round,
            entrant1_id: req.entrant1_id,
            entrant2_id: req.entrant2_id,
            scores: req.scores,
            winner_id: req.winner_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub id: MatchId,
    pub event_id: EventId,
    pub round: Option<i32>,
    pub entrant1_id: Option<EntrantId>,
    pub entrant2_id: Option<EntrantId>,
    pub scores: Option<String>,
    pub winner_id: Option<EntrantId>,
    pub entrant1_name: Option<String>,
    pub entrant2_name: Option<String>,
    pub winner_name: Option<String>,
}

impl From<MatchView> for MatchResponse {
    fn from(view: MatchView) -> Self {
        let record = view.record;
        Self {
            id: record.id,
            event_id: record.event_id,
            round: record.round,
            entrant1_id: record.entrant1_id,
            entrant2_id: record.entrant2_id,
            scores: record.scores,
            winner_id: record.winner_id,
            entrant1_name: view.entrant1_name,
            entrant2_name: view.entrant2_name,
            winner_name: view.winner_name,
        }
    }
}
