//! Data models for Innkeep

mod booking;
mod draft;
mod hotel;

pub use booking::*;
pub use draft::*;
pub use hotel::*;
