//! Booking session start.
//!
//! A new wizard session borrows exactly one booking identifier. When the
//! allocator is unavailable the session still proceeds with a provisional
//! random identifier: availability wins over strict uniqueness, and the
//! booking is flagged for manual ID reconciliation.

use rand::Rng;

use crate::contracts::SequenceAllocator;
use crate::sequence::format_booking_id;

/// A booking identifier handed to a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedBookingId {
    pub value: String,
    /// True when the allocator was unavailable and the identifier is a
    /// random placeholder with no uniqueness guarantee.
    pub provisional: bool,
}

/// Starts a booking session, allocating an identifier or degrading to a
/// provisional one.
pub async fn begin_session<A: SequenceAllocator>(allocator: &A, prefix: &str) -> IssuedBookingId {
    match allocator.allocate_next().await {
        Ok(sequence) => IssuedBookingId {
            value: format_booking_id(prefix, sequence),
            provisional: false,
        },
        Err(e) => {
            let value = provisional_booking_id(prefix);
            tracing::warn!(
                error = %e,
                booking_id = %value,
                "allocation failed, issuing provisional booking id needing manual reconciliation"
            );
            IssuedBookingId {
                value,
                provisional: true,
            }
        }
    }
}

/// Generates a provisional identifier in the allocator's display format from
/// a random 4-6 digit number.
pub fn provisional_booking_id(prefix: &str) -> String {
    let n: u32 = rand::thread_rng().gen_range(1_000..901_000);
    format_booking_id(prefix, u64::from(n))
}
