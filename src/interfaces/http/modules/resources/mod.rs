//! Resources module: browsing the fleet and quoting availability

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
