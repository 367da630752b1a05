//! Domain Value Objects
//!
//! Immutable value types for the tournament domain.

use std::fmt;

use serde::Serialize;

use crate::error::{TournamentError, TournamentResult};

pub const EVENT_NAME_MAX_LENGTH: usize = 100;
pub const ENTRANT_NAME_MAX_LENGTH: usize = 80;
pub const ENTRANT_ALIAS_MAX_LENGTH: usize = 80;

// ============================================================================
// Event status
// ============================================================================

/// Lifecycle status of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Drafting,
    Published,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Drafting,
        EventStatus::Published,
        EventStatus::Cancelled,
        EventStatus::Completed,
    ];

    /// Stored and serialized representation
    pub const fn code(self) -> &'static str {
        match self {
            EventStatus::Drafting => "drafting",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
        }
    }

    /// Parse a status code. Exact, lower-case match only.
    pub fn from_code(code: &str) -> TournamentResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| TournamentError::InvalidStatus(code.to_string()))
    }

    /// Rank in the event listing (lower comes first)
    pub const fn priority(self) -> u8 {
        match self {
            EventStatus::Published => 1,
            EventStatus::Drafting => 2,
            EventStatus::Completed => 3,
            EventStatus::Cancelled => 4,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Names
// ============================================================================

/// Trimmed, non-empty text of bounded length.
///
/// Blank input is reported as a missing field, overlong input names the field.
fn bounded_text(raw: &str, field: &str, max: usize) -> TournamentResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::MissingFields);
    }
    if trimmed.chars().count() > max {
        return Err(TournamentError::InvalidField(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    pub fn new(raw: &str) -> TournamentResult<Self> {
        bounded_text(raw, "name", EVENT_NAME_MAX_LENGTH).map(Self)
    }

    /// From a stored row (already validated)
    pub fn from_db(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntrantName(String);

impl EntrantName {
    /// Name given to an entrant that was soft-deleted
    pub const DROPPED: &'static str = "Dropped Entrant";

    pub fn new(raw: &str) -> TournamentResult<Self> {
        bounded_text(raw, "name", ENTRANT_NAME_MAX_LENGTH).map(Self)
    }

    pub fn dropped() -> Self {
        Self(Self::DROPPED.to_string())
    }

    pub fn from_db(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Optional display alias; blank input means no alias
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntrantAlias(String);

impl EntrantAlias {
    pub fn parse(raw: Option<&str>) -> TournamentResult<Option<Self>> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(alias) => bounded_text(alias, "alias", ENTRANT_ALIAS_MAX_LENGTH)
                .map(|a| Some(Self(a))),
        }
    }

    pub fn from_db(alias: String) -> Self {
        Self(alias)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
