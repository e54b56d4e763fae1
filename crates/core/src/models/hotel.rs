//! Hotel model - the stored document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Booking;

/// Inclusive bounds on the length of a hotel name, in characters
pub const NAME_MIN_LEN: u64 = 10;
pub const NAME_MAX_LEN: u64 = 60;

/// An uploaded image, as returned by the image host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelImage {
    pub url: String,
    pub public_id: String,
}

impl HotelImage {
    pub fn new(url: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            public_id: public_id.into(),
        }
    }
}

/// A bookable property with its bookings embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    /// Owning user. Stored as a bare identifier, never resolved here.
    pub user_id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub hotel_type: Option<String>,
    pub adult_count: u32,
    pub child_count: u32,
    pub facilities: Vec<String>,
    pub price_per_night: f64,
    pub star_rating: f64,
    pub image_urls: Vec<HotelImage>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Hotel {
    /// Bookings made by the given user, in insertion order
    pub fn bookings_by(&self, user_id: &str) -> impl Iterator<Item = &Booking> + '_ {
        let user_id = user_id.to_owned();
        self.bookings.iter().filter(move |b| b.user_id == user_id)
    }

    /// Keep only the bookings made by the given user
    pub fn retain_bookings_by(mut self, user_id: &str) -> Self {
        self.bookings.retain(|b| b.user_id == user_id);
        self
    }
}
