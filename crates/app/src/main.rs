//! Innkeep - hotel record store
//!
//! Command line front end over the core store. Every command prints its
//! result as JSON on stdout; logs go to stderr.

use std::process::ExitCode;

use clap::Parser;
use innkeep_core::{Database, Error, HotelRepository, InnkeepConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match InnkeepConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("innkeep: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let user_facing = e
                .downcast_ref::<Error>()
                .is_some_and(Error::is_user_facing);
            if user_facing {
                tracing::warn!("{e}");
            } else {
                tracing::error!("{e:#}");
            }
            eprintln!("innkeep: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mut config: InnkeepConfig) -> anyhow::Result<()> {
    if let Some(path) = cli.database {
        config.database.path = Some(path);
    }

    let db = Database::open_with_config(&config.database)?;
    tracing::debug!(
        schema_version = db.schema_version()?,
        hotels = db.count_hotels()?,
        "Opened store"
    );

    let output = commands::execute(&db, cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
