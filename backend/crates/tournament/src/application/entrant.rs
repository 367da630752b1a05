//! Entrant Use Cases

use std::sync::Arc;

use kernel::id::{EntrantId, EventId};
use kernel::serde_ext::{LenientInt, resolve_opt};

use crate::domain::entities::{Entrant, EntrantPatch, EntrantRemoval, NewEntrant};
use crate::domain::repository::{EntrantRepository, EventRepository};
use crate::domain::value_objects::{EntrantAlias, EntrantName};
use crate::error::{TournamentError, TournamentResult};

#[derive(Debug, Default)]
pub struct CreateEntrantInput {
    pub name: Option<String>,
    pub alias: Option<String>,
    /// Number or numeric string
    pub event_id: Option<LenientInt>,
    pub dropped: Option<bool>,
}

/// Only `name` and `alias` can change after creation
#[derive(Debug, Default)]
pub struct UpdateEntrantInput {
    pub name: Option<Option<String>>,
    pub alias: Option<Option<String>>,
}

impl UpdateEntrantInput {
    fn into_patch(self) -> TournamentResult<EntrantPatch> {
        let name = match self.name {
            None => None,
            Some(None) => return Err(TournamentError::MissingFields),
            Some(Some(raw)) => Some(EntrantName::new(&raw)?),
        };
        let alias = match self.alias {
            None => None,
            Some(raw) => Some(EntrantAlias::parse(raw.as_deref())?),
        };
        Ok(EntrantPatch { name, alias })
    }
}

pub struct EntrantUseCase<R>
where
    R: EventRepository + EntrantRepository,
{
    repo: Arc<R>,
}

impl<R> EntrantUseCase<R>
where
    R: EventRepository + EntrantRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateEntrantInput) -> TournamentResult<Entrant> {
        let event_id = resolve_opt(input.event_id.as_ref(), "event_id")?;
        let (Some(raw_name), Some(event_id)) = (input.name, event_id) else {
            return Err(TournamentError::MissingFields);
        };
        let event_id = EventId::new(event_id);

        let name = EntrantName::new(&raw_name)?;
        let alias = EntrantAlias::parse(input.alias.as_deref())?;

        if self.repo.find_event(event_id).await?.is_none() {
            return Err(TournamentError::EventNotFound);
        }

        let entrant = self
            .repo
            .create_entrant(&NewEntrant {
                event_id,
                name,
                alias,
                dropped: input.dropped.unwrap_or(false),
            })
            .await?;

        tracing::info!(entrant_id = %entrant.id, event_id = %event_id, "Entrant created");
        Ok(entrant)
    }

    pub async fn list(&self, event_id: Option<EventId>) -> TournamentResult<Vec<Entrant>> {
        self.repo.list_entrants(event_id).await
    }

    pub async fn get(&self, id: EntrantId) -> TournamentResult<Entrant> {
        self.repo
            .find_entrant(id)
            .await?
            .ok_or(TournamentError::EntrantNotFound)
    }

    pub async fn update(&self, id: EntrantId, input: UpdateEntrantInput) -> TournamentResult<Entrant> {
        let patch = input.into_patch()?;

        let mut entrant = self.get(id).await?;
        entrant.apply(patch);

        if !self.repo.update_entrant(&entrant).await? {
            return Err(TournamentError::EntrantNotFound);
        }

        tracing::info!(entrant_id = %id, "Entrant updated");
        Ok(entrant)
    }

    /// Hard delete when unreferenced, otherwise soft delete
    pub async fn remove(&self, id: EntrantId) -> TournamentResult<EntrantRemoval> {
        let removal = self
            .repo
            .retire_entrant(id)
            .await?
            .ok_or(TournamentError::EntrantNotFound)?;

        match &removal {
            EntrantRemoval::Destroy => tracing::info!(entrant_id = %id, "Entrant deleted"),
            EntrantRemoval::Dropped(_) => {
                tracing::info!(entrant_id = %id, "Entrant dropped (referenced by matches)")
            }
        }
        Ok(removal)
    }
}
