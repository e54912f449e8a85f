//! Resource aggregate (read-only to the reservation core)

pub mod model;
pub mod repository;

pub use model::{Resource, RESOURCE_SCHEMA};
pub use repository::ResourceRepository;
