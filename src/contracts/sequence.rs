use std::future::Future;

use crate::contracts::error::SequenceError;

/// Issues monotonically increasing booking sequence numbers.
///
/// # Invariants
/// - Every value returned is strictly greater than any previous one
///   observed by this instance, starting at 1 for fresh state
/// - The new value is durably persisted before it is returned
/// - Unreadable or corrupt persisted state restarts the counter from zero
///   (logged, never surfaced to the caller)
pub trait SequenceAllocator: Send + Sync {
    /// Allocates the next sequence number.
    /// The read-increment-persist cycle MUST be mutually exclusive with
    /// concurrent calls on the same instance.
    fn allocate_next(&self) -> impl Future<Output = Result<u64, SequenceError>> + Send;

    /// Returns the last issued sequence number without allocating.
    fn current(&self) -> impl Future<Output = Result<u64, SequenceError>> + Send;

    /// Number of times persisted state was unreadable and the counter
    /// restarted from zero. Restarting a production counter is an
    /// operational hazard worth watching.
    fn resets(&self) -> u64 {
        0
    }
}

/// Durable storage for the counter scalar.
///
/// The allocator performs its read-modify-write above this trait; the store
/// only moves one integer to and from the backing medium.
pub trait CounterStore: Send + Sync {
    /// Reads the persisted counter. `Ok(None)` when no state exists yet.
    fn load(&self) -> impl Future<Output = Result<Option<u64>, SequenceError>> + Send;

    /// Durably writes the counter. A failed save MUST leave the previously
    /// persisted value observable to the next `load`.
    fn save(&self, value: u64) -> impl Future<Output = Result<(), SequenceError>> + Send;
}
