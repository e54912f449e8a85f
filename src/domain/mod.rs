pub mod group;
pub mod holder;
pub mod query;
pub mod repositories;
pub mod reservation;
pub mod resource;

// Re-export commonly used types
pub use group::{GroupRepository, ResourceGroup};
pub use holder::{Holder, HolderRepository};
pub use repositories::RepositoryProvider;
pub use reservation::{DateWindow, NewReservation, PricingPolicy, Reservation, ReservationRepository};
pub use resource::{Resource, ResourceRepository};

pub use crate::shared::{DomainError, DomainResult};
