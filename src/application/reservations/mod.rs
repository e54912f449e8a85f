//! Reservation use-cases

mod service;

pub use service::ReservationService;
