//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::{Booking, Hotel, NAME_MAX_LEN, NAME_MIN_LEN};

/// Validate that a stored Hotel is internally consistent
pub fn assert_hotel_invariants(hotel: &Hotel) {
    let name_len = hotel.name.chars().count() as u64;
    debug_assert!(
        (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name_len),
        "Hotel {} has name of {} characters",
        hotel.id,
        name_len
    );

    debug_assert!(
        !hotel.facilities.is_empty(),
        "Hotel {} has no facilities",
        hotel.id
    );

    debug_assert!(
        !hotel.image_urls.is_empty(),
        "Hotel {} has no images",
        hotel.id
    );

    debug_assert!(
        hotel.price_per_night > 0.0,
        "Hotel {} has non-positive price {}",
        hotel.id,
        hotel.price_per_night
    );

    for booking in &hotel.bookings {
        assert_booking_invariants(booking);
    }
}

/// Validate that an embedded Booking is valid
pub fn assert_booking_invariants(booking: &Booking) {
    debug_assert!(
        !booking.payment_intent_id.is_empty(),
        "Booking for {} has empty payment intent",
        booking.email
    );

    debug_assert!(
        booking.check_out > booking.check_in,
        "Booking {} checks out at {} before checking in at {}",
        booking.payment_intent_id,
        booking.check_out,
        booking.check_in
    );
}
