//! HTTP Handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::application::{
    AuthConfig, AuthenticatedUser, GreetUseCase, LogInInput, LogInUseCase, LogOutUseCase,
    SignUpInput, SignUpUseCase, TokenService,
};
use crate::domain::repository::{TokenBlocklist, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    LogInRequest, LogInResponse, MessageResponse, SignUpRequest, UserResponse,
};
use crate::presentation::middleware::AuthMiddlewareState;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + TokenBlocklist + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + TokenBlocklist + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            tokens: Arc::new(TokenService::new(&config)),
            config: Arc::new(config),
        }
    }

    /// State for `require_auth`, sharing this state's revocation store and keys
    pub fn middleware_state(&self) -> AuthMiddlewareState<R> {
        AuthMiddlewareState {
            blocklist: self.repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + TokenBlocklist + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: output.user_id,
            username: output.username,
            email: output.email,
        }),
    ))
}

// ============================================================================
// Log In
// ============================================================================

/// POST /login
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LogInRequest>, JsonRejection>,
) -> AuthResult<Json<LogInResponse>>
where
    R: UserRepository + TokenBlocklist + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = LogInUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LogInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LogInResponse {
        access_token: output.access_token,
    }))
}

// ============================================================================
// Log Out (requires authentication)
// ============================================================================

/// DELETE /logout
pub async fn log_out<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + TokenBlocklist + Clone + Send + Sync + 'static,
{
    LogOutUseCase::new(state.repo.clone())
        .execute(&current)
        .await?;

    Ok(Json(MessageResponse::new("Logged out")))
}

// ============================================================================
// Protected diagnostic (requires authentication)
// ============================================================================

/// GET /protected
pub async fn protected<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + TokenBlocklist + Clone + Send + Sync + 'static,
{
    let greeting = GreetUseCase::new(state.repo.clone())
        .execute(current.user_id)
        .await?;

    Ok(Json(MessageResponse::new(greeting)))
}
