//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

mod listing;

pub mod group_repository;
pub mod holder_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod resource_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
