//! # Rental Service
//!
//! Reservation backend for rentable resources grouped under companies.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, the query language, availability and pricing rules, repository traits
//! - **application**: reservation lifecycle and filtered listings
//! - **infrastructure**: SeaORM persistence, migrations and in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, pagination and call cancellation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{config_path, default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
