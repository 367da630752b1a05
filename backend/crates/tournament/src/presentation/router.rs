//! Tournament Router
//!
//! Reads are public. Every create, update and delete goes through
//! `auth::require_auth`.

use auth::domain::repository::TokenBlocklist;
use auth::{AuthMiddlewareState, PgAuthRepository};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::{EntrantRepository, EventRepository, MatchRepository};
use crate::infra::postgres::PgTournamentRepository;
use crate::presentation::handlers::{self, TournamentAppState};

/// Create the Tournament router with PostgreSQL repositories
pub fn tournament_router(
    repo: PgTournamentRepository,
    auth: AuthMiddlewareState<PgAuthRepository>,
) -> Router {
    tournament_router_generic(TournamentAppState::new(repo), auth)
}

/// Create a generic Tournament router for any repository implementation
pub fn tournament_router_generic<R, B>(
    state: TournamentAppState<R>,
    auth: AuthMiddlewareState<B>,
) -> Router
where
    R: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
    B: TokenBlocklist + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/events", get(handlers::list_events::<R>))
        .route("/events/{id}", get(handlers::get_event::<R>))
        .route("/entrants", get(handlers::list_entrants::<R>))
        .route("/entrants/{id}", get(handlers::get_entrant::<R>))
        .route("/matches", get(handlers::list_matches::<R>))
        .route("/matches/{id}", get(handlers::get_match::<R>));

    let protected = Router::new()
        .route("/events", post(handlers::create_event::<R>))
        .route(
            "/events/{id}",
            put(handlers::update_event::<R>).delete(handlers::delete_event::<R>),
        )
        .route("/entrants", post(handlers::create_entrant::<R>))
        .route(
            "/entrants/{id}",
            put(handlers::update_entrant::<R>)
                .delete(handlers::delete_entrant::<R>),
        )
        .route("/matches", post(handlers::create_match::<R>))
        .route(
            "/matches/{id}",
            put(handlers::update_match::<R>).delete(handlers::delete_match::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            auth,
            auth::require_auth::<B>,
        ));

    public.merge(protected).with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::{AuthAppState, AuthConfig, InMemoryAuthRepository};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use kernel::id::UserId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::infra::memory::InMemoryTournamentRepository;

    struct Harness {
        app: Router,
        token: String,
    }

    fn harness() -> Harness {
        let auth = AuthAppState::new(
            InMemoryAuthRepository::new(),
            AuthConfig::new("tournament-router-secret"),
        );
        let token = auth.tokens.issue(UserId::new(1)).unwrap().token;
        let app = tournament_router_generic(
            TournamentAppState::new(InMemoryTournamentRepository::new()),
            auth.middleware_state(),
        );
        Harness { app, token }
    }

    impl Harness {
        async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let mut builder = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
            let body = match body {
                Some(json) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };
            let response = self
                .app
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, value)
        }
    }

    #[tokio::test]
    async fn test_reads_are_public_writes_are_not() {
        let h = harness();

        let request = Request::builder().uri("/events").body(Body::empty()).unwrap();
        let response = h.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .method("POST")
            .uri("/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"name": "Cup"}).to_string()))
            .unwrap();
        let response = h.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_event_create_defaults_to_drafting() {
        let h = harness();
        let (status, body) = h.send("POST", "/events", Some(json!({"name": "Cup"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "drafting");
        assert_eq!(body["entrant_count"], 0);
        assert!(body.get("entrants").is_none());
    }

    #[tokio::test]
    async fn test_invalid_status_has_action() {
        let h = harness();
        let (status, body) = h
            .send("POST", "/events", Some(json!({"name": "Cup", "status": "archived"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid status: archived");
        assert!(body["action"].is_string());
    }

    #[tokio::test]
    async fn test_path_id_must_be_integer() {
        let h = harness();
        let (status, _) = h.send("GET", "/events/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_event_filter_must_be_integer() {
        let h = harness();
        let (status, body) = h.send("GET", "/entrants?event_id=x", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid integer for event_id");
    }

    #[tokio::test]
    async fn test_entrant_delete_status_codes() {
        let h = harness();
        let (_, event) = h.send("POST", "/events", Some(json!({"name": "Cup"}))).await;
        let event_id = event["id"].as_i64().unwrap();

        let mut ids = Vec::new();
        for name in ["A", "B", "C"] {
            let (status, entrant) = h
                .send(
                    "POST",
                    "/entrants",
                    Some(json!({"name": name, "event_id": event_id.to_string()})),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            ids.push(entrant["id"].as_i64().unwrap());
        }

        let (status, _) = h
            .send(
                "POST",
                "/matches",
                Some(json!({"event_id": event_id, "entrant1_id": ids[0], "entrant2_id": ids[1]})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = h.send("DELETE", &format!("/entrants/{}", ids[2]), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = h.send("DELETE", &format!("/entrants/{}", ids[0]), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dropped"], true);
        assert_eq!(body["name"], "Dropped Entrant");
    }
}
