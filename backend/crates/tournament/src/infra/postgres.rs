//! PostgreSQL Repository Implementations

use kernel::id::{EntrantId, EventId, MatchId};
use sqlx::PgPool;

use crate::domain::entities::{
    Entrant, EntrantRemoval, Event, EventSummary, Match, NewEntrant, NewEvent, NewMatch,
};
use crate::domain::repository::{EntrantRepository, EventRepository, MatchRepository};
use crate::domain::value_objects::{EntrantAlias, EntrantName, EventName, EventStatus};
use crate::error::{TournamentError, TournamentResult};

/// CHECK constraint on `matches` that keeps the two slots distinct
const DISTINCT_ENTRANTS_CONSTRAINT: &str = "check_distinct_entrants";

/// Composite `(entrant, event_id)` foreign keys on `matches`
const SAME_EVENT_CONSTRAINTS: [&str; 3] = [
    "fk_matches_entrant1_same_event",
    "fk_matches_entrant2_same_event",
    "fk_matches_winner_same_event",
];

/// PostgreSQL-backed tournament repository
#[derive(Clone)]
pub struct PgTournamentRepository {
    pool: PgPool,
}

impl PgTournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map constraint violations on `matches` writes to domain errors
fn match_write_error(err: sqlx::Error) -> TournamentError {
    match err {
        sqlx::Error::Database(ref db) if db.constraint() == Some(DISTINCT_ENTRANTS_CONSTRAINT) => {
            TournamentError::SameEntrant
        }
        sqlx::Error::Database(ref db)
            if db
                .constraint()
                .is_some_and(|name| SAME_EVENT_CONSTRAINTS.contains(&name)) =>
        {
            TournamentError::EntrantOutsideEvent
        }
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            TournamentError::EntrantNotFound
        }
        other => TournamentError::Database(other),
    }
}

// ============================================================================
// Event Repository Implementation
// ============================================================================

const EVENT_SUMMARY_SELECT: &str = r#"
    SELECT e.id, e.name, e.date, e.rules, e.status,
           (SELECT COUNT(*) FROM entrants n WHERE n.event_id = e.id) AS entrant_count
    FROM events e
"#;

impl EventRepository for PgTournamentRepository {
    async fn create_event(&self, event: &NewEvent) -> TournamentResult<Event> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (name, date, rules, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, date, rules, status
            "#,
        )
        .bind(event.name.as_str())
        .bind(event.date.as_deref())
        .bind(event.rules.as_deref())
        .bind(event.status.code())
        .fetch_one(&self.pool)
        .await?;

        row.into_event()
    }

    async fn list_events(&self) -> TournamentResult<Vec<EventSummary>> {
        let rows = sqlx::query_as::<_, EventSummaryRow>(EVENT_SUMMARY_SELECT)
            .fetch_all(&self.pool)
            .await?;

        let mut events = rows
            .into_iter()
            .map(EventSummaryRow::into_summary)
            .collect::<TournamentResult<Vec<_>>>()?;
        events.sort_by(EventSummary::listing_order);

        Ok(events)
    }

    async fn find_event(&self, id: EventId) -> TournamentResult<Option<EventSummary>> {
        let row = sqlx::query_as::<_, EventSummaryRow>(&format!(
            "{EVENT_SUMMARY_SELECT} WHERE e.id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EventSummaryRow::into_summary).transpose()
    }

    async fn update_event(&self, event: &Event) -> TournamentResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE events
            SET name = $2, date = $3, rules = $4, status = $5
            WHERE id = $1
            "#,
        )
        .bind(event.id.get())
        .bind(event.name.as_str())
        .bind(event.date.as_deref())
        .bind(event.rules.as_deref())
        .bind(event.status.code())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_event(&self, id: EventId) -> TournamentResult<bool> {
        let mut tx = self.pool.begin().await?;

        let matches = sqlx::query("DELETE FROM matches WHERE event_id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let entrants = sqlx::query("DELETE FROM entrants WHERE event_id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if deleted > 0 {
            tracing::debug!(event_id = %id, matches, entrants, "Event cascade removed");
        }

        Ok(deleted > 0)
    }
}

// ============================================================================
// Entrant Repository Implementation
// ============================================================================

impl EntrantRepository for PgTournamentRepository {
    async fn create_entrant(&self, entrant: &NewEntrant) -> TournamentResult<Entrant> {
        let row = sqlx::query_as::<_, EntrantRow>(
            r#"
            INSERT INTO entrants (event_id, name, alias, dropped)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, name, alias, dropped
            "#,
        )
        .bind(entrant.event_id.get())
        .bind(entrant.name.as_str())
        .bind(entrant.alias.as_ref().map(EntrantAlias::as_str))
        .bind(entrant.dropped)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                TournamentError::EventNotFound
            }
            other => TournamentError::Database(other),
        })?;

        Ok(row.into_entrant())
    }

    async fn list_entrants(&self, event_id: Option<EventId>) -> TournamentResult<Vec<Entrant>> {
        let rows = sqlx::query_as::<_, EntrantRow>(
            r#"
            SELECT id, event_id, name, alias, dropped
            FROM entrants
            WHERE $1::BIGINT IS NULL OR event_id = $1
            ORDER BY id
            "#,
        )
        .bind(event_id.map(EventId::get))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EntrantRow::into_entrant).collect())
    }

    async fn find_entrant(&self, id: EntrantId) -> TournamentResult<Option<Entrant>> {
        let row = sqlx::query_as::<_, EntrantRow>(
            "SELECT id, event_id, name, alias, dropped FROM entrants WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EntrantRow::into_entrant))
    }

    async fn find_entrants_by_ids(&self, ids: &[EntrantId]) -> TournamentResult<Vec<Entrant>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let rows = sqlx::query_as::<_, EntrantRow>(
            r#"
            SELECT id, event_id, name, alias, dropped
            FROM entrants
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(raw)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EntrantRow::into_entrant).collect())
    }

    async fn update_entrant(&self, entrant: &Entrant) -> TournamentResult<bool> {
        let updated = sqlx::query("UPDATE entrants SET name = $2, alias = $3 WHERE id = $1")
            .bind(entrant.id.get())
            .bind(entrant.name.as_str())
            .bind(entrant.alias.as_ref().map(EntrantAlias::as_str))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn retire_entrant(&self, id: EntrantId) -> TournamentResult<Option<EntrantRemoval>> {
        let mut tx = self.pool.begin().await?;

        // Row lock keeps a concurrent match write from racing the reference check
        let Some(row) = sqlx::query_as::<_, EntrantRow>(
            r#"
            SELECT id, event_id, name, alias, dropped
            FROM entrants
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        let referenced: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM matches
                WHERE entrant1_id = $1 OR entrant2_id = $1 OR winner_id = $1
            )
            "#,
        )
        .bind(id.get())
        .fetch_one(&mut *tx)
        .await?;

        let removal = row.into_entrant().retire(referenced);
        match &removal {
            EntrantRemoval::Destroy => {
                sqlx::query("DELETE FROM entrants WHERE id = $1")
                    .bind(id.get())
                    .execute(&mut *tx)
                    .await?;
            }
            EntrantRemoval::Dropped(entrant) => {
                sqlx::query(
                    "UPDATE entrants SET name = $2, alias = $3, dropped = $4 WHERE id = $1",
                )
                .bind(id.get())
                .bind(entrant.name.as_str())
                .bind(entrant.alias.as_ref().map(EntrantAlias::as_str))
                .bind(entrant.dropped)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(removal))
    }
}

// ============================================================================
// Match Repository Implementation
// ============================================================================

const MATCH_COLUMNS: &str = "id, event_id, round, entrant1_id, entrant2_id, scores, winner_id";

impl MatchRepository for PgTournamentRepository {
    async fn create_match(&self, record: &NewMatch) -> TournamentResult<Match> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            INSERT INTO matches (event_id, round, entrant1_id, entrant2_id, scores, winner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(record.event_id.get())
        .bind(record.round)
        .bind(record.entrant1_id.map(EntrantId::get))
        .bind(record.entrant2_id.map(EntrantId::get))
        .bind(record.scores.as_deref())
        .bind(record.winner_id.map(EntrantId::get))
        .fetch_one(&self.pool)
        .await
        .map_err(match_write_error)?;

        Ok(row.into_match())
    }

    async fn list_matches(&self, event_id: Option<EventId>) -> TournamentResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM matches
            WHERE $1::BIGINT IS NULL OR event_id = $1
            ORDER BY id
            "#
        ))
        .bind(event_id.map(EventId::get))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MatchRow::into_match).collect())
    }

    async fn find_match(&self, id: MatchId) -> TournamentResult<Option<Match>> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MatchRow::into_match))
    }

    async fn update_match(&self, record: &Match) -> TournamentResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE matches
            SET round = $2, entrant1_id = $3, entrant2_id = $4, scores = $5, winner_id = $6
            WHERE id = $1
            "#,
        )
        .bind(record.id.get())
        .bind(record.round)
        .bind(record.entrant1_id.map(EntrantId::get))
        .bind(record.entrant2_id.map(EntrantId::get))
        .bind(record.scores.as_deref())
        .bind(record.winner_id.map(EntrantId::get))
        .execute(&self.pool)
        .await
        .map_err(match_write_error)?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_match(&self, id: MatchId) -> TournamentResult<bool> {
        let deleted = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct EventRow {
    id: i64,
    name: String,
    date: Option<String>,
    rules: Option<String>,
    status: String,
}

impl EventRow {
    fn into_event(self) -> TournamentResult<Event> {
        // The CHECK constraint makes this unreachable short of manual edits
        let status = EventStatus::from_code(&self.status).map_err(|_| {
            TournamentError::Internal(format!("event {}: stored status {:?}", self.id, self.status))
        })?;

        Ok(Event {
            id: EventId::new(self.id),
            name: EventName::from_db(self.name),
            date: self.date,
            rules: self.rules,
            status,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EventSummaryRow {
    #[sqlx(flatten)]
    event: EventRow,
    entrant_count: i64,
}

impl EventSummaryRow {
    fn into_summary(self) -> TournamentResult<EventSummary> {
        Ok(EventSummary {
            event: self.event.into_event()?,
            entrant_count: self.entrant_count,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EntrantRow {
    id: i64,
    event_id: i64,
    name: String,
    alias: Option<String>,
    dropped: bool,
}

impl EntrantRow {
    fn into_entrant(self) -> Entrant {
        Entrant {
            id: EntrantId::new(self.id),
            event_id: EventId::new(self.event_id),
            name: EntrantName::from_db(self.name),
            alias: self.alias.map(EntrantAlias::from_db),
            dropped: self.dropped,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MatchRow {
    id: i64,
    event_id: i64,
    round: Option<i32>,
    entrant1_id: Option<i64>,
    entrant2_id: Option<i64>,
    scores: Option<String>,
    winner_id: Option<i64>,
}

impl MatchRow {
    fn into_match(self) -> Match {
        Match {
            id: MatchId::new(self.id),
            event_id: EventId::new(self.event_id),
            round: self.round,
            entrant1_id: self.entrant1_id.map(EntrantId::new),
            entrant2_id: self.entrant2_id.map(EntrantId::new),
            scores: self.scores,
            winner_id: self.winner_id.map(EntrantId::new),
        }
    }
}
