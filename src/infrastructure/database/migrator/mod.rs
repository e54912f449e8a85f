//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_holders;
mod m20250101_000002_create_resource_groups;
mod m20250101_000003_create_resources;
mod m20250101_000004_create_reservations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_holders::Migration),
            Box::new(m20250101_000002_create_resource_groups::Migration),
            Box::new(m20250101_000003_create_resources::Migration),
            Box::new(m20250101_000004_create_reservations::Migration),
        ]
    }
}
