//! Schema migrations
//!
//! Each step runs in its own transaction together with its row in
//! `schema_migrations`, so a failed step leaves the previous version intact.

use rusqlite::{params, Connection};
use tracing::{debug, info, instrument};

use crate::error::Result;

struct Step {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        description: "hotels table",
        sql: r#"
            -- One row per hotel document. List fields and the embedded
            -- bookings are JSON arrays so a hotel is written as a unit.
            CREATE TABLE IF NOT EXISTS hotels (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                city TEXT NOT NULL,
                country TEXT NOT NULL,
                description TEXT,
                hotel_type TEXT,
                adult_count INTEGER NOT NULL,
                child_count INTEGER NOT NULL DEFAULT 0,
                facilities TEXT NOT NULL DEFAULT '[]',
                price_per_night REAL NOT NULL,
                star_rating REAL NOT NULL,
                image_urls TEXT NOT NULL DEFAULT '[]',
                last_updated TEXT NOT NULL,
                bookings TEXT NOT NULL DEFAULT '[]'
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_hotels_name ON hotels(name);
        "#,
    },
    Step {
        version: 2,
        description: "owner index for list_for_owner",
        sql: "CREATE INDEX IF NOT EXISTS idx_hotels_user ON hotels(user_id);",
    },
];

pub(crate) fn get_current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })?;
    Ok(version.unwrap_or(0))
}

fn apply(conn: &Connection, step: &Step) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(step.sql)?;
    tx.execute(
        "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
        params![step.version, step.description, chrono::Utc::now().to_rfc3339()],
    )?;
    tx.commit()?;
    Ok(())
}

/// Bring the schema up to the latest version
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )?;

    let from = get_current_version(conn)?;
    let pending: Vec<&Step> = STEPS.iter().filter(|s| s.version > from).collect();
    if pending.is_empty() {
        debug!(version = from, "Schema up to date");
        return Ok(());
    }

    for step in &pending {
        apply(conn, step)?;
        debug!(version = step.version, description = step.description, "Applied migration");
    }

    info!(from, to = get_current_version(conn)?, "Database schema updated");
    Ok(())
}
