//! Auth Middleware
//!
//! Middleware for requiring a bearer token on protected routes.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::{CheckTokenUseCase, TokenService};
use crate::domain::repository::TokenBlocklist;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<B>
where
    B: TokenBlocklist + Clone + Send + Sync + 'static,
{
    pub blocklist: Arc<B>,
    pub tokens: Arc<TokenService>,
}

/// Middleware that requires a valid, unrevoked access token
///
/// Use with `axum::middleware::from_fn_with_state`. On success the
/// [`AuthenticatedUser`](crate::application::AuthenticatedUser) is inserted
/// into the request extensions.
pub async fn require_auth<B>(
    State(state): State<AuthMiddlewareState<B>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    B: TokenBlocklist + Clone + Send + Sync + 'static,
{
    // A header that is not valid visible ASCII is treated as an invalid token
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AuthError::InvalidToken)?
                .to_owned(),
        ),
        None => None,
    };

    let use_case = CheckTokenUseCase::new(state.blocklist.clone(), state.tokens.clone());
    let user = use_case.execute(authorization.as_deref()).await?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
