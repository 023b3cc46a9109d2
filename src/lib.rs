pub mod api;
pub mod booking;
pub mod contracts;
pub mod mailer;
pub mod sequence;
