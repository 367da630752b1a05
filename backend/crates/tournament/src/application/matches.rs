//! Match Use Cases

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{EntrantId, EventId, MatchId};
use kernel::serde_ext::{LenientInt, resolve_opt};

use crate::domain::entities::{Match, MatchPatch, MatchView, NewMatch};
use crate::domain::repository::{EntrantRepository, EventRepository, MatchRepository};
use crate::error::{TournamentError, TournamentResult};

#[derive(Debug, Default)]
pub struct CreateMatchInput {
    pub event_id: Option<LenientInt>,
    pub entrant1_id: Option<LenientInt>,
    pub entrant2_id: Option<LenientInt>,
    pub round: Option<LenientInt>,
    pub scores: Option<String>,
    /// Empty string or `null` means no winner
    pub winner_id: Option<LenientInt>,
}

/// Tri-state fields; an empty string clears an id like `null` does
#[derive(Debug, Default)]
pub struct UpdateMatchInput {
    pub round: Option<Option<LenientInt>>,
    pub entrant1_id: Option<Option<LenientInt>>,
    pub entrant2_id: Option<Option<LenientInt>>,
    pub scores: Option<Option<String>>,
    pub winner_id: Option<Option<LenientInt>>,
}

fn round_number(value: Option<&LenientInt>) -> TournamentResult<Option<i32>> {
    resolve_opt(value, "round")?
        .map(|n| {
            i32::try_from(n)
                .map_err(|_| TournamentError::InvalidField("round is out of range".into()))
        })
        .transpose()
}

fn entrant_id(value: Option<&LenientInt>, field: &'static str) -> TournamentResult<Option<EntrantId>> {
    Ok(resolve_opt(value, field)?.map(EntrantId::new))
}

impl UpdateMatchInput {
    fn into_patch(self) -> TournamentResult<MatchPatch> {
        Ok(MatchPatch {
            round: self.round.map(|v| round_number(v.as_ref())).transpose()?,
            entrant1_id: self
                .entrant1_id
                .map(|v| entrant_id(v.as_ref(), "entrant1_id"))
                .transpose()?,
            entrant2_id: self
                .entrant2_id
                .map(|v| entrant_id(v.as_ref(), "entrant2_id"))
                .transpose()?,
            scores: self.scores,
            winner_id: self
                .winner_id
                .map(|v| entrant_id(v.as_ref(), "winner_id"))
                .transpose()?,
        })
    }
}

/// Attach entrant names to matches with one lookup for the whole batch
pub(crate) async fn resolve_names<R>(repo: &R, matches: Vec<Match>) -> TournamentResult<Vec<MatchView>>
where
    R: EntrantRepository,
{
    let mut ids: Vec<EntrantId> = matches.iter().flat_map(Match::entrant_refs).collect();
    ids.sort();
    ids.dedup();

    let names: HashMap<EntrantId, String> = repo
        .find_entrants_by_ids(&ids)
        .await?
        .into_iter()
        .map(|e| (e.id, e.name.as_str().to_string()))
        .collect();
    let name_of = |id: Option<EntrantId>| id.and_then(|id| names.get(&id).cloned());

    Ok(matches
        .into_iter()
        .map(|record| MatchView {
            entrant1_name: name_of(record.entrant1_id),
            entrant2_name: name_of(record.entrant2_id),
            winner_name: name_of(record.winner_id),
            record,
        })
        .collect())
}

pub struct MatchUseCase<R>
where
    R: EventRepository + EntrantRepository + MatchRepository,
{
    repo: Arc<R>,
}

impl<R> MatchUseCase<R>
where
    R: EventRepository + EntrantRepository + MatchRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every referenced entrant must exist and belong to `event_id`
    async fn ensure_entrants_in_event(
        &self,
        event_id: EventId,
        refs: impl Iterator<Item = EntrantId>,
    ) -> TournamentResult<()> {
        let mut ids: Vec<EntrantId> = refs.collect();
        ids.sort();
        ids.dedup();
        let found = self.repo.find_entrants_by_ids(&ids).await?;
        if found.len() != ids.len() {
            return Err(TournamentError::EntrantNotFound);
        }
        if found.iter().any(|e| e.event_id != event_id) {
            return Err(TournamentError::EntrantOutsideEvent);
        }
        Ok(())
    }

    async fn view(&self, record: Match) -> TournamentResult<MatchView> {
        resolve_names(self.repo.as_ref(), vec![record])
            .await?
            .pop()
            .ok_or_else(|| TournamentError::Internal("name resolution lost a match".into()))
    }

    pub async fn create(&self, input: CreateMatchInput) -> TournamentResult<MatchView> {
        let event_id = resolve_opt(input.event_id.as_ref(), "event_id")?;
        let entrant1_id = entrant_id(input.entrant1_id.as_ref(), "entrant1_id")?;
        let entrant2_id = entrant_id(input.entrant2_id.as_ref(), "entrant2_id")?;
        let (Some(event_id), Some(_), Some(_)) = (event_id, entrant1_id, entrant2_id) else {
            return Err(TournamentError::MissingFields);
        };

        let new_match = NewMatch {
            event_id: EventId::new(event_id),
            round: round_number(input.round.as_ref())?,
            entrant1_id,
            entrant2_id,
            scores: input.scores,
            winner_id: entrant_id(input.winner_id.as_ref(), "winner_id")?,
        };
        new_match.validate_winner()?;

        if self.repo.find_event(new_match.event_id).await?.is_none() {
            return Err(TournamentError::EventNotFound);
        }
        self.ensure_entrants_in_event(new_match.event_id, new_match.entrant_refs())
            .await?;

        let record = self.repo.create_match(&new_match).await?;

        tracing::info!(match_id = %record.id, event_id = %record.event_id, "Match created");
        self.view(record).await
    }

    pub async fn list(&self, event_id: Option<EventId>) -> TournamentResult<Vec<MatchView>> {
        let matches = self.repo.list_matches(event_id).await?;
        resolve_names(self.repo.as_ref(), matches).await
    }

    pub async fn get(&self, id: MatchId) -> TournamentResult<MatchView> {
        let record = self
            .repo
            .find_match(id)
            .await?
            .ok_or(TournamentError::MatchNotFound)?;
        self.view(record).await
    }

    pub async fn update(&self, id: MatchId, input: UpdateMatchInput) -> TournamentResult<MatchView> {
        let patch = input.into_patch()?;

        let mut record = self
            .repo
            .find_match(id)
            .await?
            .ok_or(TournamentError::MatchNotFound)?;

        record.apply(patch);
        record.validate_winner()?;
        self.ensure_entrants_in_event(record.event_id, record.entrant_refs())
            .await?;

        if !self.repo.update_match(&record).await? {
            return Err(TournamentError::MatchNotFound);
        }

        tracing::info!(match_id = %id, "Match updated");
        self.view(record).await
    }

    pub async fn delete(&self, id: MatchId) -> TournamentResult<()> {
        if !self.repo.delete_match(id).await? {
            return Err(TournamentError::MatchNotFound);
        }
        tracing::info!(match_id = %id, "Match deleted");
        Ok(())
    }
}
