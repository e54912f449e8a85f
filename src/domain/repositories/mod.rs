//! Repository access for the domain layer
//!
//! `RepositoryProvider` hands out every per-aggregate repository from one
//! backend, so services depend on a single trait object:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let resource = repos.resources().find_by_id(3).await?;
//!     let booked = repos.reservations().find_by_resource(3).await?;
//! }
//! ```

use super::group::GroupRepository;
use super::holder::HolderRepository;
use super::reservation::ReservationRepository;
use super::resource::ResourceRepository;

pub trait RepositoryProvider: Send + Sync {
    fn reservations(&self) -> &dyn ReservationRepository;
    fn resources(&self) -> &dyn ResourceRepository;
    fn groups(&self) -> &dyn GroupRepository;
    fn holders(&self) -> &dyn HolderRepository;
}
