//! Validation gates for hotel and booking candidates
//!
//! Field rules are declared on the draft types with `validator`; this module
//! runs them, adds the cross-field checks, and collects every violation into
//! a [`ValidationReport`] keyed by the record-layout field name.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{BookingDraft, HotelDraft};

/// One violated field rule
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

/// All violations found in one candidate, ordered by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut report = Self::default();
        report.push(field, reason);
        report
    }

    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            reason: reason.into(),
        });
        self.violations.sort();
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Distinct offending field names
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.violations.iter().map(|v| v.field.as_str()).collect();
        fields.dedup();
        fields
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl From<ValidationErrors> for ValidationReport {
    fn from(errors: ValidationErrors) -> Self {
        let mut report = Self::default();
        for (field, errs) in errors.field_errors() {
            let label = field_label(&field);
            for err in errs.iter() {
                let reason = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                report.push(label.clone(), reason);
            }
        }
        report
    }
}

/// Map a Rust field name onto the record-layout name (`price_per_night` -> `pricePerNight`)
fn field_label(field: &str) -> String {
    if field == "hotel_type" {
        return "type".to_string();
    }

    let mut label = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            label.extend(c.to_uppercase());
            upper = false;
        } else {
            label.push(c);
        }
    }
    label
}

/// Run the field rules for a hotel candidate, plus the finite rating check
pub fn validate_hotel(draft: &HotelDraft) -> Result<(), ValidationReport> {
    let mut report = match draft.validate() {
        Ok(()) => ValidationReport::default(),
        Err(errors) => errors.into(),
    };

    if let Some(rating) = draft.star_rating {
        if !rating.is_finite() {
            report.push("starRating", "Star Rating must be a number");
        }
    }

    report.into_result()
}

/// Run the field rules for a booking candidate, plus the stay-order check
pub fn validate_booking(draft: &BookingDraft) -> Result<(), ValidationReport> {
    let mut report = match draft.validate() {
        Ok(()) => ValidationReport::default(),
        Err(errors) => errors.into(),
    };

    if let (Some(check_in), Some(check_out)) = (draft.check_in, draft.check_out) {
        if check_out <= check_in {
            report.push("checkOut", "Check Out date must be after Check In date");
        }
    }

    report.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HotelImage;
    use chrono::{Duration, Utc};

    fn hotel_draft() -> HotelDraft {
        HotelDraft {
            user_id: Some("u1".to_string()),
            name: Some("Grand Oasis Resort".to_string()),
            city: Some("Lisbon".to_string()),
            country: Some("Portugal".to_string()),
            adult_count: Some(2),
            child_count: Some(0),
            facilities: Some(vec!["wifi".to_string()]),
            price_per_night: Some(120.0),
            star_rating: Some(4.0),
            image_urls: Some(vec![HotelImage::new("http://x/1.jpg", "1")]),
            ..Default::default()
        }
    }

    fn booking_draft() -> BookingDraft {
        let check_in = Utc::now() + Duration::days(7);
        BookingDraft {
            user_id: Some("u2".to_string()),
            name: Some("Jane".to_string()),
            email: Some("j@x.com".to_string()),
            adult_count: Some(1),
            child_count: Some(0),
            check_in: Some(check_in),
            check_out: Some(check_in + Duration::days(3)),
            total_cost: Some(300.0),
            payment_intent_id: Some("pi_123".to_string()),
        }
    }

    #[test]
    fn test_valid_hotel() {
        assert!(validate_hotel(&hotel_draft()).is_ok());
    }

    #[test]
    fn test_reports_every_missing_field() {
        let report = validate_hotel(&HotelDraft::default()).unwrap_err();
        for field in [
            "userId",
            "name",
            "city",
            "country",
            "adultCount",
            "facilities",
            "pricePerNight",
            "starRating",
            "imageUrls",
        ] {
            assert!(report.has_field(field), "missing {field} in {report}");
        }
        assert!(!report.has_field("childCount"));
        assert!(!report.has_field("description"));
        assert!(!report.has_field("type"));
    }

    #[test]
    fn test_required_message() {
        let draft = HotelDraft {
            name: None,
            ..hotel_draft()
        };
        let report = validate_hotel(&draft).unwrap_err();
        assert_eq!(report.fields(), vec!["name"]);
        assert_eq!(report.violations()[0].reason, "Name is required");
    }

    #[test]
    fn test_name_length_bounds() {
        for (name, ok) in [
            ("Short", false),
            ("123456789", false),
            ("1234567890", true),
            (&"x".repeat(60)[..], true),
            (&"x".repeat(61)[..], false),
        ] {
            let draft = HotelDraft {
                name: Some(name.to_string()),
                ..hotel_draft()
            };
            assert_eq!(validate_hotel(&draft).is_ok(), ok, "name {name:?}");
        }
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 10 characters, 20 bytes
        let draft = HotelDraft {
            name: Some("ÅÅÅÅÅÅÅÅÅÅ".to_string()),
            ..hotel_draft()
        };
        assert!(validate_hotel(&draft).is_ok());
    }

    #[test]
    fn test_empty_lists_rejected() {
        let draft = HotelDraft {
            facilities: Some(Vec::new()),
            image_urls: Some(Vec::new()),
            ..hotel_draft()
        };
        let report = validate_hotel(&draft).unwrap_err();
        assert_eq!(report.fields(), vec!["facilities", "imageUrls"]);
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let draft = HotelDraft {
            city: Some(String::new()),
            ..hotel_draft()
        };
        let report = validate_hotel(&draft).unwrap_err();
        assert_eq!(report.violations()[0].reason, "City is required");
    }

    #[test]
    fn test_price_must_be_positive() {
        let draft = HotelDraft {
            price_per_night: Some(0.0),
            ..hotel_draft()
        };
        let report = validate_hotel(&draft).unwrap_err();
        assert!(report.has_field("pricePerNight"));
    }

    #[test]
    fn test_star_rating_must_be_finite() {
        for rating in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let draft = HotelDraft {
                star_rating: Some(rating),
                ..hotel_draft()
            };
            let report = validate_hotel(&draft).unwrap_err();
            assert_eq!(report.fields(), vec!["starRating"], "rating {rating}");
        }
    }

    #[test]
    fn test_whitespace_passes_presence_check() {
        // Presence means non-empty; whitespace is kept as given
        let draft = HotelDraft {
            city: Some("   ".to_string()),
            ..hotel_draft()
        };
        assert!(validate_hotel(&draft).is_ok());
    }

    #[test]
    fn test_valid_booking() {
        assert!(validate_booking(&booking_draft()).is_ok());
    }

    #[test]
    fn test_booking_missing_payment_intent() {
        let draft = BookingDraft {
            payment_intent_id: None,
            ..booking_draft()
        };
        let report = validate_booking(&draft).unwrap_err();
        assert_eq!(report.fields(), vec!["paymentIntentId"]);
        assert_eq!(
            report.violations()[0].reason,
            "Payment intent id is required"
        );
    }

    #[test]
    fn test_booking_check_out_before_check_in() {
        let mut draft = booking_draft();
        draft.check_out = draft.check_in;
        let report = validate_booking(&draft).unwrap_err();
        assert!(report.has_field("checkOut"));
    }

    #[test]
    fn test_booking_bad_email() {
        let draft = BookingDraft {
            email: Some("not-an-email".to_string()),
            ..booking_draft()
        };
        assert!(validate_booking(&draft).unwrap_err().has_field("email"));
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("price_per_night"), "pricePerNight");
        assert_eq!(field_label("name"), "name");
        assert_eq!(field_label("hotel_type"), "type");
        assert_eq!(field_label("imageUrls"), "imageUrls");
    }

    #[test]
    fn test_report_display() {
        let mut report = ValidationReport::single("name", "Name is required");
        report.push("city", "City is required");
        assert_eq!(
            report.to_string(),
            "city: City is required; name: Name is required"
        );
    }
}
