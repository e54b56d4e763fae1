//! SQLite storage layer for Innkeep

mod hotels;
mod migrations;
mod parse;
mod traits;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;
use tracing::instrument;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{BookingDraft, Hotel, HotelDraft, HotelPatch};

pub use hotels::HotelStore;
pub use traits::HotelRepository;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_timeout(path, DatabaseConfig::default().busy_timeout())
    }

    /// Open the database described by a `[database]` config section,
    /// creating its parent directory if needed
    pub fn open_with_config(config: &DatabaseConfig) -> Result<Self> {
        let path = config.resolve_path()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Self::open_with_timeout(path, config.busy_timeout())
    }

    fn open_with_timeout<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<u32> {
        migrations::get_current_version(&self.conn)
    }

    /// Get hotel store
    pub fn hotels(&self) -> HotelStore<'_> {
        HotelStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl HotelRepository for Database {
    fn validate_hotel(&self, draft: &HotelDraft) -> Result<()> {
        self.hotels().validate(draft, None)
    }

    fn create_hotel(&self, draft: HotelDraft) -> Result<Hotel> {
        self.hotels().create(draft)
    }

    fn get_hotel(&self, id: Uuid) -> Result<Hotel> {
        self.hotels().get(id)
    }

    fn find_hotel_by_id(&self, id: Uuid) -> Result<Option<Hotel>> {
        self.hotels().find_by_id(id)
    }

    fn update_hotel(&self, id: Uuid, patch: HotelPatch) -> Result<Hotel> {
        self.hotels().update(id, patch)
    }

    fn delete_hotel(&self, id: Uuid) -> Result<()> {
        self.hotels().delete(id)
    }

    fn add_booking(&self, hotel_id: Uuid, draft: BookingDraft) -> Result<Hotel> {
        self.hotels().add_booking(hotel_id, draft)
    }

    fn list_hotels_for_owner(&self, user_id: &str) -> Result<Vec<Hotel>> {
        self.hotels().list_for_owner(user_id)
    }

    fn list_bookings_for_user(&self, user_id: &str) -> Result<Vec<Hotel>> {
        self.hotels().bookings_for_user(user_id)
    }

    fn count_hotels(&self) -> Result<u64> {
        self.hotels().count()
    }
}
