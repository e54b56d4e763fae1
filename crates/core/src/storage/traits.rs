//! Storage repository traits
//!
//! These traits define the storage interface, allowing for different
//! implementations (SQLite, mock, future document backend).

use uuid::Uuid;

use crate::error::Result;
use crate::models::{BookingDraft, Hotel, HotelDraft, HotelPatch};

/// Hotel repository operations
///
/// Write operations pass through the validation gate; the backend is
/// responsible for per-document atomicity.
pub trait HotelRepository {
    /// Check a candidate against the field rules and name uniqueness
    fn validate_hotel(&self, draft: &HotelDraft) -> Result<()>;

    /// Create a new Hotel, returning the stored document
    fn create_hotel(&self, draft: HotelDraft) -> Result<Hotel>;

    /// Get Hotel by ID
    fn get_hotel(&self, id: Uuid) -> Result<Hotel>;

    /// Find Hotel by ID
    fn find_hotel_by_id(&self, id: Uuid) -> Result<Option<Hotel>>;

    /// Apply a partial update to a Hotel
    fn update_hotel(&self, id: Uuid, patch: HotelPatch) -> Result<Hotel>;

    /// Delete a Hotel and its bookings
    fn delete_hotel(&self, id: Uuid) -> Result<()>;

    /// Append a booking to a Hotel
    fn add_booking(&self, hotel_id: Uuid, draft: BookingDraft) -> Result<Hotel>;

    /// List Hotels owned by a user
    fn list_hotels_for_owner(&self, user_id: &str) -> Result<Vec<Hotel>>;

    /// Hotels with bookings by a user, filtered to that user's bookings
    fn list_bookings_for_user(&self, user_id: &str) -> Result<Vec<Hotel>>;

    /// Number of stored Hotels
    fn count_hotels(&self) -> Result<u64>;
}
