//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::group::GroupRepository;
use crate::domain::holder::HolderRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::resource::ResourceRepository;

use super::group_repository::SeaOrmGroupRepository;
use super::holder_repository::SeaOrmHolderRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::resource_repository::SeaOrmResourceRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let resource = repos.resources().find_by_id(3).await?;
/// let booked = repos.reservations().find_by_resource(3).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    reservations: SeaOrmReservationRepository,
    resources: SeaOrmResourceRepository,
    groups: SeaOrmGroupRepository,
    holders: SeaOrmHolderRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            reservations: SeaOrmReservationRepository::new(db.clone()),
            resources: SeaOrmResourceRepository::new(db.clone()),
            groups: SeaOrmGroupRepository::new(db.clone()),
            holders: SeaOrmHolderRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn resources(&self) -> &dyn ResourceRepository {
        &self.resources
    }

    fn groups(&self) -> &dyn GroupRepository {
        &self.groups
    }

    fn holders(&self) -> &dyn HolderRepository {
        &self.holders
    }
}
