//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use api::{ApiConfig, build_router, cors_layer, init_tracing};
use auth::{AuthAppState, PgAuthRepository};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tournament::{PgTournamentRepository, TournamentAppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing("api=info,auth=info,tournament=info,tower_http=info");

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: expired tokens would be rejected anyway
    // Errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    if let Err(e) = auth_repo.cleanup_expired().await {
        tracing::warn!(
            error = %e,
            "Token revocation cleanup failed, continuing anyway"
        );
    }

    let app = build_router(
        AuthAppState::new(auth_repo, config.auth.clone()),
        TournamentAppState::new(PgTournamentRepository::new(pool)),
        cors_layer(&config.frontend_origins),
    );

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
