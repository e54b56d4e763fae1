//! Hotel storage operations
//!
//! Each hotel is one row; its bookings live in a JSON array column and are
//! appended in place, so a concurrent append never overwrites another.

use chrono::Utc;
use rusqlite::{ffi, params, Connection, Row};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::parse::{parse_datetime, parse_json, parse_uuid, OptionalExt};
use crate::error::{Error, Result};
use crate::invariants::assert_hotel_invariants;
use crate::models::{BookingDraft, Hotel, HotelDraft, HotelPatch};
use crate::validation::validate_hotel;

const HOTEL_COLUMNS: &str = "id, user_id, name, city, country, description, hotel_type, \
     adult_count, child_count, facilities, price_per_night, star_rating, image_urls, \
     last_updated, bookings";

pub struct HotelStore<'a> {
    conn: &'a Connection,
}

impl<'a> HotelStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Run the write gate: field rules first, then name uniqueness.
    ///
    /// `exclude` skips the hotel being updated in the uniqueness check.
    #[instrument(skip(self, draft), fields(name = ?draft.name))]
    pub fn validate(&self, draft: &HotelDraft, exclude: Option<Uuid>) -> Result<()> {
        validate_hotel(draft)?;

        if let Some(name) = &draft.name {
            if self.name_taken(name, exclude)? {
                return Err(Error::Conflict(format!(
                    "a hotel named '{}' already exists",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Create a new Hotel
    #[instrument(skip(self, draft), fields(name = ?draft.name))]
    pub fn create(&self, draft: HotelDraft) -> Result<Hotel> {
        self.validate(&draft, None)?;

        let hotel = draft.into_hotel(Uuid::new_v4(), Utc::now())?;
        assert_hotel_invariants(&hotel);

        self.conn
            .execute(
                &format!(
                    "INSERT INTO hotels ({HOTEL_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
                ),
                params![
                    hotel.id.to_string(),
                    hotel.user_id,
                    hotel.name,
                    hotel.city,
                    hotel.country,
                    hotel.description,
                    hotel.hotel_type,
                    hotel.adult_count,
                    hotel.child_count,
                    serde_json::to_string(&hotel.facilities)?,
                    hotel.price_per_night,
                    hotel.star_rating,
                    serde_json::to_string(&hotel.image_urls)?,
                    hotel.last_updated.to_rfc3339(),
                    serde_json::to_string(&hotel.bookings)?,
                ],
            )
            .map_err(|e| name_conflict(e, &hotel.name))?;

        info!(hotel_id = %hotel.id, "Hotel created");
        Ok(hotel)
    }

    /// Find Hotel by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = ?1"))?;

        let hotel = stmt
            .query_row(params![id.to_string()], hotel_from_row)
            .optional()?;

        Ok(hotel)
    }

    /// Get Hotel by ID, failing if it does not exist
    pub fn get(&self, id: Uuid) -> Result<Hotel> {
        self.find_by_id(id)?
            .ok_or_else(|| Error::NotFound(format!("hotel {}", id)))
    }

    /// Apply a partial update and re-validate the merged document.
    ///
    /// The bookings column is not written, so appends racing this update
    /// are preserved.
    #[instrument(skip(self, patch))]
    pub fn update(&self, id: Uuid, patch: HotelPatch) -> Result<Hotel> {
        let current = self.get(id)?;
        let draft = patch.merge(&current);
        self.validate(&draft, Some(id))?;

        let mut hotel = draft.into_hotel(id, Utc::now())?;
        hotel.bookings = current.bookings;
        assert_hotel_invariants(&hotel);

        let changed = self
            .conn
            .execute(
                "UPDATE hotels SET user_id = ?1, name = ?2, city = ?3, country = ?4,
                 description = ?5, hotel_type = ?6, adult_count = ?7, child_count = ?8,
                 facilities = ?9, price_per_night = ?10, star_rating = ?11, image_urls = ?12,
                 last_updated = ?13
                 WHERE id = ?14",
                params![
                    hotel.user_id,
                    hotel.name,
                    hotel.city,
                    hotel.country,
                    hotel.description,
                    hotel.hotel_type,
                    hotel.adult_count,
                    hotel.child_count,
                    serde_json::to_string(&hotel.facilities)?,
                    hotel.price_per_night,
                    hotel.star_rating,
                    serde_json::to_string(&hotel.image_urls)?,
                    hotel.last_updated.to_rfc3339(),
                    id.to_string(),
                ],
            )
            .map_err(|e| name_conflict(e, &hotel.name))?;

        if changed == 0 {
            return Err(Error::NotFound(format!("hotel {}", id)));
        }

        debug!(hotel_id = %id, "Hotel updated");
        self.get(id)
    }

    /// Delete Hotel together with its embedded bookings
    #[instrument(skip(self))]
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM hotels WHERE id = ?1", params![id.to_string()])?;

        if removed == 0 {
            return Err(Error::NotFound(format!("hotel {}", id)));
        }

        info!(hotel_id = %id, "Hotel deleted");
        Ok(())
    }

    /// Append a booking to a Hotel's booking list
    #[instrument(skip(self, draft))]
    pub fn add_booking(&self, hotel_id: Uuid, draft: BookingDraft) -> Result<Hotel> {
        let booking = draft.into_booking(Utc::now())?;
        let booking_json = serde_json::to_string(&booking)?;

        let changed = self.conn.execute(
            "UPDATE hotels SET bookings = json_insert(bookings, '$[#]', json(?1))
             WHERE id = ?2",
            params![booking_json, hotel_id.to_string()],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(format!("hotel {}", hotel_id)));
        }

        info!(
            hotel_id = %hotel_id,
            payment_intent_id = %booking.payment_intent_id,
            "Booking added"
        );
        self.get(hotel_id)
    }

    /// List all Hotels owned by a user
    #[instrument(skip(self))]
    pub fn list_for_owner(&self, user_id: &str) -> Result<Vec<Hotel>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE user_id = ?1 ORDER BY name"
        ))?;

        let hotels = stmt
            .query_map(params![user_id], hotel_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(hotels)
    }

    /// Hotels holding bookings made by a user, each carrying only that
    /// user's bookings
    #[instrument(skip(self))]
    pub fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Hotel>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels
             WHERE EXISTS (
                 SELECT 1 FROM json_each(hotels.bookings)
                 WHERE json_extract(json_each.value, '$.userId') = ?1
             )
             ORDER BY name"
        ))?;

        let hotels = stmt
            .query_map(params![user_id], hotel_from_row)?
            .map(|row| row.map(|hotel| hotel.retain_bookings_by(user_id)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(hotels)
    }

    /// Check whether a name is already used by another Hotel
    pub fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> Result<bool> {
        let exclude = exclude.map(|id| id.to_string()).unwrap_or_default();
        let taken = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM hotels WHERE name = ?1 AND id != ?2)",
            params![name, exclude],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(taken)
    }

    /// Number of stored Hotels
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM hotels", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn hotel_from_row(row: &Row<'_>) -> rusqlite::Result<Hotel> {
    Ok(Hotel {
        id: parse_uuid(0, &row.get::<_, String>(0)?)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        city: row.get(3)?,
        country: row.get(4)?,
        description: row.get(5)?,
        hotel_type: row.get(6)?,
        adult_count: row.get(7)?,
        child_count: row.get(8)?,
        facilities: parse_json(9, &row.get::<_, String>(9)?)?,
        price_per_night: row.get(10)?,
        star_rating: row.get(11)?,
        image_urls: parse_json(12, &row.get::<_, String>(12)?)?,
        last_updated: parse_datetime(13, &row.get::<_, String>(13)?)?,
        bookings: parse_json(14, &row.get::<_, String>(14)?)?,
    })
}

/// A unique-index violation on insert/update means the name was taken
/// between the uniqueness check and the write. Any other constraint
/// failure is a backend error.
fn name_conflict(err: rusqlite::Error, name: &str) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Error::Conflict(format!("a hotel named '{}' already exists", name))
        }
        _ => Error::StoreUnavailable(err),
    }
}
