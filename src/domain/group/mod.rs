//! Group aggregate

pub mod model;
pub mod repository;

pub use model::{ResourceGroup, GROUP_SCHEMA};
pub use repository::GroupRepository;
