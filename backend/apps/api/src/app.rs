//! Router assembly
//!
//! Auth and tournament routers share one revocation store: the tournament
//! write routes are guarded with the auth state's middleware.

use auth::AuthAppState;
use auth::domain::repository::{TokenBlocklist, UserRepository};
use axum::http::{HeaderValue, Method, header};
use axum::{Router, routing::get};
use tournament::TournamentAppState;
use tournament::domain::repository::{EntrantRepository, EventRepository, MatchRepository};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// GET /health
async fn health() -> &'static str {
    "OK"
}

/// CORS for the listed browser origins. Unparseable origins are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

/// Build the full application router
pub fn build_router<A, T>(
    auth: AuthAppState<A>,
    tournament: TournamentAppState<T>,
    cors: CorsLayer,
) -> Router
where
    A: UserRepository + TokenBlocklist + Clone + Send + Sync + 'static,
    T: EventRepository + EntrantRepository + MatchRepository + Send + Sync + 'static,
{
    let guard = auth.middleware_state();

    Router::new()
        .route("/health", get(health))
        .merge(auth::auth_router_generic(auth))
        .merge(tournament::tournament_router_generic(tournament, guard))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
