//! Command line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "innkeep", version, about = "Hotel record store")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured path
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a hotel from a JSON document
    Create {
        /// JSON file in the hotel record layout
        file: PathBuf,
    },
    /// Print a hotel with its bookings
    Get { id: Uuid },
    /// Apply a JSON patch to a hotel
    Update {
        id: Uuid,
        /// JSON file with the fields to change
        file: PathBuf,
    },
    /// Delete a hotel and its bookings
    Delete { id: Uuid },
    /// Append a booking from a JSON document
    Book {
        id: Uuid,
        /// JSON file in the booking record layout
        file: PathBuf,
    },
    /// List hotels owned by a user
    List {
        #[arg(long)]
        owner: String,
    },
    /// List a user's bookings, grouped by hotel
    Bookings {
        #[arg(long)]
        user: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_book() {
        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from([
            "innkeep",
            "--config",
            "innkeep.toml",
            "book",
            &id.to_string(),
            "booking.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("innkeep.toml")));
        match cli.command {
            Command::Book { id: parsed, file } => {
                assert_eq!(parsed, id);
                assert_eq!(file, PathBuf::from("booking.json"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_id() {
        assert!(Cli::try_parse_from(["innkeep", "get", "not-a-uuid"]).is_err());
    }
}
