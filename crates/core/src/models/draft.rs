//! Write-side candidates for hotels and bookings
//!
//! Every field is optional so a missing required field can be reported
//! rather than rejected by the deserializer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Booking, Hotel, HotelImage};
use crate::validation::{validate_booking, validate_hotel, ValidationReport};

/// Candidate hotel supplied to `create`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HotelDraft {
    #[validate(
        required(message = "User ID is required"),
        length(min = 1, message = "User ID is required")
    )]
    pub user_id: Option<String>,

    #[validate(
        required(message = "Name is required"),
        length(min = 10, max = 60, message = "Name must be between 10 and 60 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "City is required"),
        length(min = 1, message = "City is required")
    )]
    pub city: Option<String>,

    #[validate(
        required(message = "Country is required"),
        length(min = 1, message = "Country is required")
    )]
    pub country: Option<String>,

    pub description: Option<String>,

    #[serde(rename = "type")]
    pub hotel_type: Option<String>,

    #[validate(required(message = "Adult count is required"))]
    pub adult_count: Option<u32>,

    /// Defaults to 0
    pub child_count: Option<u32>,

    #[validate(
        required(message = "Facilities is required"),
        length(min = 1, message = "Facilities is required")
    )]
    pub facilities: Option<Vec<String>>,

    #[validate(
        required(message = "Price per night is required"),
        range(exclusive_min = 0.0, message = "Price per night must be positive")
    )]
    pub price_per_night: Option<f64>,

    #[validate(required(message = "Star Rating is required"))]
    pub star_rating: Option<f64>,

    #[validate(
        required(message = "Images are required"),
        length(min = 1, message = "Images are required")
    )]
    pub image_urls: Option<Vec<HotelImage>>,
}

impl HotelDraft {
    /// Validate and build the stored document.
    ///
    /// Uniqueness of the name is not checked here; that needs the store.
    pub fn into_hotel(
        self,
        id: Uuid,
        last_updated: DateTime<Utc>,
    ) -> Result<Hotel, ValidationReport> {
        validate_hotel(&self)?;

        match (
            self.user_id,
            self.name,
            self.city,
            self.country,
            self.adult_count,
            self.facilities,
            self.price_per_night,
            self.star_rating,
            self.image_urls,
        ) {
            (
                Some(user_id),
                Some(name),
                Some(city),
                Some(country),
                Some(adult_count),
                Some(facilities),
                Some(price_per_night),
                Some(star_rating),
                Some(image_urls),
            ) => Ok(Hotel {
                id,
                user_id,
                name,
                city,
                country,
                description: self.description,
                hotel_type: self.hotel_type,
                adult_count,
                child_count: self.child_count.unwrap_or(0),
                facilities,
                price_per_night,
                star_rating,
                image_urls,
                last_updated,
                bookings: Vec::new(),
            }),
            _ => Err(ValidationReport::single("hotel", "Hotel is incomplete")),
        }
    }
}

impl From<&Hotel> for HotelDraft {
    fn from(hotel: &Hotel) -> Self {
        Self {
            user_id: Some(hotel.user_id.clone()),
            name: Some(hotel.name.clone()),
            city: Some(hotel.city.clone()),
            country: Some(hotel.country.clone()),
            description: hotel.description.clone(),
            hotel_type: hotel.hotel_type.clone(),
            adult_count: Some(hotel.adult_count),
            child_count: Some(hotel.child_count),
            facilities: Some(hotel.facilities.clone()),
            price_per_night: Some(hotel.price_per_night),
            star_rating: Some(hotel.star_rating),
            image_urls: Some(hotel.image_urls.clone()),
        }
    }
}

/// Partial update applied by `update`. Absent fields are left unchanged.
///
/// An absent field and an explicit `null` are the same thing here, so a
/// patch cannot clear `description` or `type` once they are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPatch {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub hotel_type: Option<String>,
    pub adult_count: Option<u32>,
    pub child_count: Option<u32>,
    pub facilities: Option<Vec<String>>,
    pub price_per_night: Option<f64>,
    pub star_rating: Option<f64>,
    pub image_urls: Option<Vec<HotelImage>>,
}

impl HotelPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto a stored hotel, producing the candidate to re-validate
    pub fn merge(self, hotel: &Hotel) -> HotelDraft {
        let base = HotelDraft::from(hotel);
        HotelDraft {
            user_id: self.user_id.or(base.user_id),
            name: self.name.or(base.name),
            city: self.city.or(base.city),
            country: self.country.or(base.country),
            description: self.description.or(base.description),
            hotel_type: self.hotel_type.or(base.hotel_type),
            adult_count: self.adult_count.or(base.adult_count),
            child_count: self.child_count.or(base.child_count),
            facilities: self.facilities.or(base.facilities),
            price_per_night: self.price_per_night.or(base.price_per_night),
            star_rating: self.star_rating.or(base.star_rating),
            image_urls: self.image_urls.or(base.image_urls),
        }
    }
}

/// Candidate booking supplied to `add_booking`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[validate(
        required(message = "User ID is required"),
        length(min = 1, message = "User ID is required")
    )]
    pub user_id: Option<String>,

    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Email must be a valid address")
    )]
    pub email: Option<String>,

    #[validate(required(message = "Number of adults is required"))]
    pub adult_count: Option<u32>,

    #[validate(required(message = "Number of children is required"))]
    pub child_count: Option<u32>,

    #[validate(required(message = "Check In date is required"))]
    pub check_in: Option<DateTime<Utc>>,

    #[validate(required(message = "Check Out date is required"))]
    pub check_out: Option<DateTime<Utc>>,

    #[validate(
        required(message = "Total cost is required"),
        range(exclusive_min = 0.0, message = "Total cost must be positive")
    )]
    pub total_cost: Option<f64>,

    #[validate(
        required(message = "Payment intent id is required"),
        length(min = 1, message = "Payment intent id is required")
    )]
    pub payment_intent_id: Option<String>,
}

impl BookingDraft {
    /// Validate and build the embedded booking
    pub fn into_booking(self, last_updated: DateTime<Utc>) -> Result<Booking, ValidationReport> {
        validate_booking(&self)?;

        match (
            self.user_id,
            self.name,
            self.email,
            self.adult_count,
            self.child_count,
            self.check_in,
            self.check_out,
            self.total_cost,
            self.payment_intent_id,
        ) {
            (
                Some(user_id),
                Some(name),
                Some(email),
                Some(adult_count),
                Some(child_count),
                Some(check_in),
                Some(check_out),
                Some(total_cost),
                Some(payment_intent_id),
            ) => Ok(Booking {
                user_id,
                name,
                email,
                adult_count,
                child_count,
                check_in,
                check_out,
                total_cost,
                payment_intent_id,
                last_updated,
            }),
            _ => Err(ValidationReport::single("booking", "Booking is incomplete")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn full_draft() -> HotelDraft {
        HotelDraft {
            user_id: Some("u1".to_string()),
            name: Some("Grand Oasis Resort".to_string()),
            city: Some("Lisbon".to_string()),
            country: Some("Portugal".to_string()),
            adult_count: Some(2),
            facilities: Some(vec!["wifi".to_string()]),
            price_per_night: Some(120.0),
            star_rating: Some(4.0),
            image_urls: Some(vec![HotelImage::new("http://x/1.jpg", "1")]),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_hotel_defaults_child_count() {
        let now = Utc::now();
        let hotel = full_draft().into_hotel(Uuid::new_v4(), now).unwrap();
        assert_eq!(hotel.child_count, 0);
        assert_eq!(hotel.last_updated, now);
        assert!(hotel.bookings.is_empty());
    }

    #[test]
    fn test_into_hotel_rejects_missing_fields() {
        let draft = HotelDraft {
            city: None,
            ..full_draft()
        };
        let report = draft.into_hotel(Uuid::new_v4(), Utc::now()).unwrap_err();
        assert!(report.has_field("city"));
    }

    #[test]
    fn test_patch_merge_keeps_unpatched_fields() {
        let hotel = full_draft().into_hotel(Uuid::new_v4(), Utc::now()).unwrap();
        let patch = HotelPatch {
            price_per_night: Some(99.5),
            ..Default::default()
        };

        let merged = patch.merge(&hotel);
        assert_eq!(merged.price_per_night, Some(99.5));
        assert_eq!(merged.name.as_deref(), Some("Grand Oasis Resort"));
        assert_eq!(merged.child_count, Some(0));
    }

    #[test]
    fn test_patch_cannot_clear_optional_fields() {
        let hotel = HotelDraft {
            description: Some("Sea view".to_string()),
            hotel_type: Some("Resort".to_string()),
            ..full_draft()
        }
        .into_hotel(Uuid::new_v4(), Utc::now())
        .unwrap();

        let patch: HotelPatch =
            serde_json::from_str(r#"{"description": null, "type": null}"#).unwrap();
        assert!(patch.is_empty());

        let merged = patch.merge(&hotel);
        assert_eq!(merged.description.as_deref(), Some("Sea view"));
        assert_eq!(merged.hotel_type.as_deref(), Some("Resort"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(HotelPatch::default().is_empty());
        let patch = HotelPatch {
            city: Some("Porto".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_draft_deserializes_record_layout() {
        let json = r#"{
            "userId": "u1",
            "name": "Grand Oasis Resort",
            "city": "Lisbon",
            "country": "Portugal",
            "type": "Resort",
            "adultCount": 2,
            "facilities": ["wifi", "pool"],
            "pricePerNight": 120,
            "starRating": 4,
            "imageUrls": [{"url": "http://x/1.jpg", "public_id": "1"}]
        }"#;

        let draft: HotelDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.hotel_type.as_deref(), Some("Resort"));
        assert_eq!(draft.child_count, None);
        assert_eq!(draft.image_urls.unwrap()[0].public_id, "1");
    }

    #[test]
    fn test_into_booking() {
        let check_in = Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 6, 4, 11, 0, 0).unwrap();
        let draft = BookingDraft {
            user_id: Some("u2".to_string()),
            name: Some("Jane".to_string()),
            email: Some("j@x.com".to_string()),
            adult_count: Some(1),
            child_count: Some(0),
            check_in: Some(check_in),
            check_out: Some(check_out),
            total_cost: Some(300.0),
            payment_intent_id: Some("pi_123".to_string()),
        };

        let booking = draft.into_booking(Utc::now()).unwrap();
        assert_eq!(booking.payment_intent_id, "pi_123");
        assert_eq!(booking.check_out, check_out);
        assert!(booking.check_out > booking.check_in);
    }
}
