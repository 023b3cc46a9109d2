//! Booking-flow logic that sits between the HTTP surface and the allocator.

pub mod fare;
pub mod session;

pub use fare::calculate_fare;
pub use session::{begin_session, provisional_booking_id, IssuedBookingId};
