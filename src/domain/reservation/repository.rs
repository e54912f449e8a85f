//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{NewReservation, Reservation};
use crate::domain::query::QueryPlan;
use crate::shared::{DomainResult, PaginatedResult};

/// Decides whether a write may proceed, given every reservation currently
/// stored for the affected resource.
pub type Admission<'a> = &'a (dyn Fn(&[Reservation]) -> bool + Send + Sync);

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Store `reservation` if `admit` accepts the resource's reservations.
    ///
    /// The lookup passed to `admit` and the insert are atomic with respect to
    /// other writers. Returns `None` when `admit` rejects.
    async fn create_checked(
        &self,
        reservation: NewReservation,
        admit: Admission<'_>,
    ) -> DomainResult<Option<Reservation>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    async fn find_by_holder(&self, holder_id: i32) -> DomainResult<Vec<Reservation>>;

    /// All reservations of one resource, oldest window first
    async fn find_by_resource(&self, resource_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Persist the new window and total of `reservation` under the same
    /// atomicity as [`create_checked`](Self::create_checked).
    ///
    /// Fails `NotFound` if the reservation no longer exists.
    async fn update_checked(
        &self,
        reservation: Reservation,
        admit: Admission<'_>,
    ) -> DomainResult<Option<Reservation>>;

    /// Fails `NotFound` if there is nothing to delete.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Reservations whose window contains `day`
    async fn find_current(&self, day: NaiveDate) -> DomainResult<Vec<Reservation>>;

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<Reservation>>;
}
