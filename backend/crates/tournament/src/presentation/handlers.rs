//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::id::{EntrantId, EventId, MatchId};

use crate::application::{EntrantUseCase, EventUseCase, MatchUseCase};
use crate::domain::entities::EntrantRemoval;
use crate::domain::repository::{EntrantRepository, EventRepository, MatchRepository};
use crate::error::TournamentResult;
use crate::presentation::dto::{
    CreateEntrantRequest, CreateEventRequest, CreateMatchRequest, EntrantResponse,
    EventDetailResponse, EventResponse, ListQuery, MatchResponse, UpdateEntrantRequest,
    UpdateEventRequest, UpdateMatchRequest,
};

/// Shared state for tournament handlers
pub struct TournamentAppState<R>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// Only the `Arc` is cloned, so the store itself need not be `Clone`
impl<R> Clone for TournamentAppState<R>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> TournamentAppState<R>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

type PathId = Result<Path<i64>, PathRejection>;

fn event_filter(query: Result<Query<ListQuery>, QueryRejection>) -> TournamentResult<Option<EventId>> {
    let Query(query) = query?;
    let id = kernel::serde_ext::resolve_opt(query.event_id.as_ref(), "event_id")?;
    Ok(id.map(EventId::new))
}

// ============================================================================
// Events
// ============================================================================

/// GET /events
pub async fn list_events<R>(
    State(state): State<TournamentAppState<R>>,
) -> TournamentResult<Json<Vec<EventResponse>>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let events = EventUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// POST /events
pub async fn create_event<R>(
    State(state): State<TournamentAppState<R>>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> TournamentResult<(StatusCode, Json<EventResponse>)>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let event = EventUseCase::new(state.repo.clone())
        .create(req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// GET /events/{id}
pub async fn get_event<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
) -> TournamentResult<Json<EventDetailResponse>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let detail = EventUseCase::new(state.repo.clone())
        .get(EventId::new(id))
        .await?;
    Ok(Json(detail.into()))
}

/// PUT /events/{id}
pub async fn update_event<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
    payload: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> TournamentResult<Json<EventResponse>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let Json(req) = payload?;
    let event = EventUseCase::new(state.repo.clone())
        .update(EventId::new(id), req.into())
        .await?;
    Ok(Json(event.into()))
}

/// DELETE /events/{id}
pub async fn delete_event<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
) -> TournamentResult<StatusCode>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    EventUseCase::new(state.repo.clone())
        .delete(EventId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Entrants
// ============================================================================

/// GET /entrants?event_id=
pub async fn list_entrants<R>(
    State(state): State<TournamentAppState<R>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> TournamentResult<Json<Vec<EntrantResponse>>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let event_id = event_filter(query)?;
    let entrants = EntrantUseCase::new(state.repo.clone())
        .list(event_id)
        .await?;
    Ok(Json(entrants.into_iter().map(Into::into).collect()))
}

/// POST /entrants
pub async fn create_entrant<R>(
    State(state): State<TournamentAppState<R>>,
    payload: Result<Json<CreateEntrantRequest>, JsonRejection>,
) -> TournamentResult<(StatusCode, Json<EntrantResponse>)>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let entrant = EntrantUseCase::new(state.repo.clone())
        .create(req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(entrant.into())))
}

/// GET /entrants/{id}
pub async fn get_entrant<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
) -> TournamentResult<Json<EntrantResponse>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let entrant = EntrantUseCase::new(state.repo.clone())
        .get(EntrantId::new(id))
        .await?;
    Ok(Json(entrant.into()))
}

/// PUT /entrants/{id}
pub async fn update_entrant<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
    payload: Result<Json<UpdateEntrantRequest>, JsonRejection>,
) -> TournamentResult<Json<EntrantResponse>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let Json(req) = payload?;
    let entrant = EntrantUseCase::new(state.repo.clone())
        .update(EntrantId::new(id), req.into())
        .await?;
    Ok(Json(entrant.into()))
}

/// DELETE /entrants/{id}
///
/// 204 when the entrant was removed, 200 with the record when it was only
/// marked dropped.
pub async fn delete_entrant<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
) -> TournamentResult<Response>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let removal = EntrantUseCase::new(state.repo.clone())
        .remove(EntrantId::new(id))
        .await?;

    Ok(match removal {
        EntrantRemoval::Destroy => StatusCode::NO_CONTENT.into_response(),
        EntrantRemoval::Dropped(entrant) => Json(EntrantResponse::from(entrant)).into_response(),
    })
}

// ============================================================================
// Matches
// ============================================================================

/// GET /matches?event_id=
pub async fn list_matches<R>(
    State(state): State<TournamentAppState<R>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> TournamentResult<Json<Vec<MatchResponse>>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let event_id = event_filter(query)?;
    let matches = MatchUseCase::new(state.repo.clone()).list(event_id).await?;
    Ok(Json(matches.into_iter().map(Into::into).collect()))
}

/// POST /matches
pub async fn create_match<R>(
    State(state): State<TournamentAppState<R>>,
    payload: Result<Json<CreateMatchRequest>, JsonRejection>,
) -> TournamentResult<(StatusCode, Json<MatchResponse>)>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let record = MatchUseCase::new(state.repo.clone())
        .create(req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /matches/{id}
pub async fn get_match<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
) -> TournamentResult<Json<MatchResponse>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let record = MatchUseCase::new(state.repo.clone())
        .get(MatchId::new(id))
        .await?;
    Ok(Json(record.into()))
}

/// PUT /matches/{id}
pub async fn update_match<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
    payload: Result<Json<UpdateMatchRequest>, JsonRejection>,
) -> TournamentResult<Json<MatchResponse>>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let Json(req) = payload?;
    let record = MatchUseCase::new(state.repo.clone())
        .update(MatchId::new(id), req.into())
        .await?;
    Ok(Json(record.into()))
}

/// DELETE /matches/{id}
pub async fn delete_match<R>(
    State(state): State<TournamentAppState<R>>,
    id: PathId,
) -> TournamentResult<StatusCode>
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    MatchUseCase::new(state.repo.clone())
        .delete(MatchId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
