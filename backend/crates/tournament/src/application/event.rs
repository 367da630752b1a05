//! Event Use Cases

use std::sync::Arc;

use kernel::id::EventId;

use crate::application::matches::resolve_names;
use crate::domain::entities::{EventDetail, EventPatch, EventSummary, NewEvent};
use crate::domain::repository::{EntrantRepository, EventRepository, MatchRepository};
use crate::domain::value_objects::{EventName, EventStatus};
use crate::error::{TournamentError, TournamentResult};

/// Create request fields, as received
#[derive(Debug, Default)]
pub struct CreateEventInput {
    pub name: Option<String>,
    pub date: Option<String>,
    pub rules: Option<String>,
    pub status: Option<String>,
}

/// Update request fields. Outer `None` = key absent, inner `None` = `null`.
#[derive(Debug, Default)]
pub struct UpdateEventInput {
    pub name: Option<Option<String>>,
    pub date: Option<Option<String>>,
    pub rules: Option<Option<String>>,
    pub status: Option<Option<String>>,
}

impl UpdateEventInput {
    fn into_patch(self) -> TournamentResult<EventPatch> {
        let name = match self.name {
            None => None,
            Some(None) => return Err(TournamentError::MissingFields),
            Some(Some(raw)) => Some(EventName::new(&raw)?),
        };
        let status = match self.status {
            None => None,
            Some(None) => return Err(TournamentError::InvalidStatus("null".into())),
            Some(Some(code)) => Some(EventStatus::from_code(&code)?),
        };

        Ok(EventPatch {
            name,
            date: self.date,
            rules: self.rules,
            status,
        })
    }
}

pub struct EventUseCase<R>
where
    R: EventRepository + EntrantRepository + MatchRepository,
{
    repo: Arc<R>,
}

impl<R> EventUseCase<R>
where
    R: EventRepository + EntrantRepository + MatchRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateEventInput) -> TournamentResult<EventSummary> {
        let name = EventName::new(input.name.as_deref().unwrap_or_default())?;
        let status = match input.status.as_deref() {
            Some(code) => EventStatus::from_code(code)?,
            None => EventStatus::default(),
        };

        let event = self
            .repo
            .create_event(&NewEvent {
                name,
                date: input.date,
                rules: input.rules,
                status,
            })
            .await?;

        tracing::info!(event_id = %event.id, status = %event.status, "Event created");

        Ok(EventSummary {
            event,
            entrant_count: 0,
        })
    }

    pub async fn list(&self) -> TournamentResult<Vec<EventSummary>> {
        self.repo.list_events().await
    }

    pub async fn get(&self, id: EventId) -> TournamentResult<EventDetail> {
        let summary = self
            .repo
            .find_event(id)
            .await?
            .ok_or(TournamentError::EventNotFound)?;

        let entrants = self.repo.list_entrants(Some(id)).await?;
        let matches = self.repo.list_matches(Some(id)).await?;
        let matches = resolve_names(self.repo.as_ref(), matches).await?;

        Ok(EventDetail {
            summary,
            entrants,
            matches,
        })
    }

    pub async fn update(&self, id: EventId, input: UpdateEventInput) -> TournamentResult<EventSummary> {
        let patch = input.into_patch()?;

        let mut summary = self
            .repo
            .find_event(id)
            .await?
            .ok_or(TournamentError::EventNotFound)?;

        summary.event.apply(patch);

        if !self.repo.update_event(&summary.event).await? {
            return Err(TournamentError::EventNotFound);
        }

        tracing::info!(event_id = %id, "Event updated");
        Ok(summary)
    }

    pub async fn delete(&self, id: EventId) -> TournamentResult<()> {
        if !self.repo.delete_event(id).await? {
            return Err(TournamentError::EventNotFound);
        }
        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }
}
