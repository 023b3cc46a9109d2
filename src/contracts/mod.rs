pub mod booking;
pub mod error;
pub mod mailer;
pub mod sequence;

pub use booking::{
    BookingData, Car, Coordinates, Customer, Payment, PaymentMethod, ReturnTrip, Trip,
};
pub use error::{MailError, SequenceError};
pub use mailer::{Mailer, OutboundEmail};
pub use sequence::{CounterStore, SequenceAllocator};
