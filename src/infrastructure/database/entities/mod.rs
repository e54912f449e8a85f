//! Database entities module

pub mod holder;
pub mod reservation;
pub mod resource;
pub mod resource_group;

pub use holder::Entity as Holder;
pub use reservation::Entity as Reservation;
pub use resource::Entity as Resource;
pub use resource_group::Entity as ResourceGroup;
