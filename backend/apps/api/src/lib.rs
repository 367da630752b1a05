//! Tournament API server
//!
//! `main` wires PostgreSQL stores into [`app::build_router`]; tests use the
//! in-memory stores with the same router. The `seed` binary loads
//! development data through the same repositories.

pub mod app;
pub mod config;

pub use app::{build_router, cors_layer};
pub use config::{ApiConfig, ConfigError};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// fmt subscriber; `RUST_LOG` overrides `default_filter`
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
