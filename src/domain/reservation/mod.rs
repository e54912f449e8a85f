//! Reservation aggregate
//!
//! Contains the Reservation entity, its date window, the availability and
//! pricing rules, and the repository interface.

pub mod availability;
pub mod model;
pub mod pricing;
pub mod repository;
pub mod window;

pub use availability::{conflicts, find_conflict, is_available};
pub use model::{NewReservation, Reservation, RESERVATION_SCHEMA};
pub use pricing::{billable_days, total_cost, PricingPolicy};
pub use repository::{Admission, ReservationRepository};
pub use window::{parse_date, DateWindow, DATE_FORMAT};
