//! Reservations module: booking, rescheduling and cancelling

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
