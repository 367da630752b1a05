//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::{TokenBlocklist, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(AuthAppState::new(repo, config))
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + TokenBlocklist + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/logout", delete(handlers::log_out::<R>))
        .route("/protected", get(handlers::protected::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.middleware_state(),
            require_auth::<R>,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::log_in::<R>))
        .merge(protected)
        .with_state(state)
}
