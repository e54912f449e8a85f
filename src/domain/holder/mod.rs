//! Holder aggregate, consulted only for existence checks

pub mod model;
pub mod repository;

pub use model::Holder;
pub use repository::HolderRepository;
