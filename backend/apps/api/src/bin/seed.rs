//! Development data loader
//!
//! Applies migrations, optionally clears every event, then loads a seed
//! file through the tournament repositories.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use api::{config, init_tracing};
use pico_args::Arguments;
use sqlx::postgres::PgPoolOptions;
use tournament::PgTournamentRepository;
use tournament::application::{SeedData, SeedUseCase};

const DEFAULT_SEED_FILE: &str = "database/seeds/tournament.json";

const HELP: &str = "\
Load development data into the tournament database

USAGE:
  seed [OPTIONS]

OPTIONS:
  --file       PATH        Seed file  [default: database/seeds/tournament.json]

FLAGS:
  --reset                  Delete every event (with its entrants and matches) before loading
  --reset-only             Delete every event and exit without loading
  -h, --help               Print help information

ENVIRONMENT:
  DATABASE_URL             PostgreSQL connection string
";

struct Args {
    file: PathBuf,
    reset: bool,
    load: bool,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let reset_only = pargs.contains("--reset-only");
    let args = Args {
        reset: reset_only || pargs.contains("--reset"),
        load: !reset_only,
        file: pargs
            .opt_value_from_str("--file")?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_FILE)),
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        anyhow::bail!("unexpected arguments: {rest:?}");
    }
    Ok(Some(args))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("seed=info,tournament=info");

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // Read before touching the database so a bad path clears nothing
    let data = if args.load {
        let raw = tokio::fs::read_to_string(&args.file)
            .await
            .with_context(|| format!("reading {}", args.file.display()))?;
        Some(
            SeedData::from_json(&raw)
                .with_context(|| format!("parsing {}", args.file.display()))?,
        )
    } else {
        None
    };

    let database_url = config::database_url(|name| std::env::var(name).ok())?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    let seeder = SeedUseCase::new(Arc::new(PgTournamentRepository::new(pool)));

    if args.reset {
        let removed = seeder.reset().await?;
        tracing::info!(events = removed, "Cleared existing data");
    }

    if let Some(data) = data {
        let report = seeder.load(&data).await?;
        tracing::info!(
            events = report.events,
            entrants = report.entrants,
            matches = report.matches,
            file = %args.file.display(),
            "Seeding finished"
        );
    }

    Ok(())
}
