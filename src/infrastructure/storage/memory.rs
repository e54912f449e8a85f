//! In-memory repositories for development and testing

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::query::QueryPlan;
use crate::domain::reservation::Admission;
use crate::domain::{
    GroupRepository, Holder, HolderRepository, NewReservation, RepositoryProvider, Reservation,
    ReservationRepository, Resource, ResourceGroup, ResourceRepository,
};
use crate::shared::{DomainError, DomainResult, PaginatedResult};

/// Every repository backed by `DashMap`s.
///
/// Checked reservation writes serialize on one async mutex, so the conflict
/// lookup and the insert cannot interleave with another writer.
pub struct InMemoryRepositoryProvider {
    holders: DashMap<i32, Holder>,
    groups: DashMap<i32, ResourceGroup>,
    resources: DashMap<i32, Resource>,
    reservations: DashMap<i32, Reservation>,
    holder_counter: AtomicI32,
    group_counter: AtomicI32,
    resource_counter: AtomicI32,
    reservation_counter: AtomicI32,
    write_lock: Mutex<()>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            holders: DashMap::new(),
            groups: DashMap::new(),
            resources: DashMap::new(),
            reservations: DashMap::new(),
            holder_counter: AtomicI32::new(1),
            group_counter: AtomicI32::new(1),
            resource_counter: AtomicI32::new(1),
            reservation_counter: AtomicI32::new(1),
            write_lock: Mutex::new(()),
        }
    }

    /// Store `holder` under the next free id and return it.
    pub fn add_holder(&self, mut holder: Holder) -> Holder {
        holder.id = self.holder_counter.fetch_add(1, Ordering::SeqCst);
        self.holders.insert(holder.id, holder.clone());
        holder
    }

    pub fn add_group(&self, mut group: ResourceGroup) -> ResourceGroup {
        group.id = self.group_counter.fetch_add(1, Ordering::SeqCst);
        self.groups.insert(group.id, group.clone());
        group
    }

    pub fn add_resource(&self, mut resource: Resource) -> Resource {
        resource.id = self.resource_counter.fetch_add(1, Ordering::SeqCst);
        self.resources.insert(resource.id, resource.clone());
        resource
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    fn reservations_of(&self, resource_id: i32) -> Vec<Reservation> {
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.resource_id == resource_id)
            .map(|r| r.clone())
            .collect();
        found.sort_by_key(|r| (r.start_date, r.id));
        found
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }

    fn resources(&self) -> &dyn ResourceRepository {
        self
    }

    fn groups(&self) -> &dyn GroupRepository {
        self
    }

    fn holders(&self) -> &dyn HolderRepository {
        self
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepositoryProvider {
    async fn create_checked(
        &self,
        reservation: NewReservation,
        admit: Admission<'_>,
    ) -> DomainResult<Option<Reservation>> {
        let _guard = self.write_lock.lock().await;

        if !admit(&self.reservations_of(reservation.resource_id)) {
            return Ok(None);
        }

        let stored = Reservation {
            id: self.reservation_counter.fetch_add(1, Ordering::SeqCst),
            resource_id: reservation.resource_id,
            holder_id: reservation.holder_id,
            start_date: reservation.window.start(),
            end_date: reservation.window.end(),
            total: reservation.total,
            created_at: Utc::now(),
        };
        self.reservations.insert(stored.id, stored.clone());
        Ok(Some(stored))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn find_by_holder(&self, holder_id: i32) -> DomainResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.holder_id == holder_id)
            .map(|r| r.clone())
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn find_by_resource(&self, resource_id: i32) -> DomainResult<Vec<Reservation>> {
        Ok(self.reservations_of(resource_id))
    }

    async fn update_checked(
        &self,
        reservation: Reservation,
        admit: Admission<'_>,
    ) -> DomainResult<Option<Reservation>> {
        let _guard = self.write_lock.lock().await;

        let Some(mut stored) = self.reservations.get(&reservation.id).map(|r| r.clone()) else {
            return Err(DomainError::not_found("Reservation", reservation.id));
        };

        if !admit(&self.reservations_of(stored.resource_id)) {
            return Ok(None);
        }

        stored.reschedule(reservation.window(), reservation.total);
        self.reservations.insert(stored.id, stored.clone());
        Ok(Some(stored))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.reservations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    async fn find_current(&self, day: NaiveDate) -> DomainResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.window().contains(day))
            .map(|r| r.clone())
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<Reservation>> {
        Ok(plan.paginate(self.reservations.iter().map(|r| r.clone())))
    }
}

#[async_trait]
impl ResourceRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Resource>> {
        Ok(self.resources.get(&id).map(|r| r.clone()))
    }

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<Resource>> {
        Ok(plan.paginate(self.resources.iter().map(|r| r.clone())))
    }
}

#[async_trait]
impl GroupRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ResourceGroup>> {
        Ok(self.groups.get(&id).map(|g| g.clone()))
    }

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<ResourceGroup>> {
        Ok(plan.paginate(self.groups.iter().map(|g| g.clone())))
    }
}

#[async_trait]
impl HolderRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Holder>> {
        Ok(self.holders.get(&id).map(|h| h.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::{DateWindow, RESERVATION_SCHEMA};
    use crate::domain::query::PageLimits;
    use rust_decimal::Decimal;

    fn new_reservation(resource_id: i32, start: &str, end: &str) -> NewReservation {
        NewReservation {
            resource_id,
            holder_id: 1,
            window: DateWindow::parse(start, end).unwrap(),
            total: Decimal::from(100),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repos = InMemoryRepositoryProvider::new();
        let accept_all = |_: &[Reservation]| true;

        let a = repos
            .create_checked(new_reservation(1, "2025-01-01", "2025-01-02"), &accept_all)
            .await
            .unwrap()
            .unwrap();
        let b = repos
            .create_checked(new_reservation(1, "2025-01-05", "2025-01-06"), &accept_all)
            .await
            .unwrap()
            .unwrap();

        assert!(b.id > a.id);
        assert_eq!(repos.reservation_count(), 2);
    }

    #[tokio::test]
    async fn rejected_admission_stores_nothing() {
        let repos = InMemoryRepositoryProvider::new();
        let reject = |_: &[Reservation]| false;

        let result = repos
            .create_checked(new_reservation(1, "2025-01-01", "2025-01-02"), &reject)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(repos.reservation_count(), 0);
    }

    #[tokio::test]
    async fn admission_sees_only_the_same_resource() {
        let repos = InMemoryRepositoryProvider::new();
        let accept_all = |_: &[Reservation]| true;
        repos
            .create_checked(new_reservation(1, "2025-01-01", "2025-01-02"), &accept_all)
            .await
            .unwrap();
        repos
            .create_checked(new_reservation(2, "2025-01-01", "2025-01-02"), &accept_all)
            .await
            .unwrap();

        let only_resource_two = |seen: &[Reservation]| seen.iter().all(|r| r.resource_id == 2);
        let created = repos
            .create_checked(new_reservation(2, "2025-02-01", "2025-02-02"), &only_resource_two)
            .await
            .unwrap();
        assert!(created.is_some());
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repos = InMemoryRepositoryProvider::new();
        let w = DateWindow::parse("2025-01-01", "2025-01-02").unwrap();
        let ghost = Reservation {
            id: 99,
            resource_id: 1,
            holder_id: 1,
            start_date: w.start(),
            end_date: w.end(),
            total: Decimal::ZERO,
            created_at: Utc::now(),
        };

        let err = repos.update_checked(ghost, &|_: &[Reservation]| true).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_twice_fails_the_second_time() {
        let repos = InMemoryRepositoryProvider::new();
        let created = repos
            .create_checked(new_reservation(1, "2025-01-01", "2025-01-02"), &|_: &[Reservation]| true)
            .await
            .unwrap()
            .unwrap();

        repos.delete(created.id).await.unwrap();
        assert!(repos.delete(created.id).await.is_err());
    }

    #[tokio::test]
    async fn current_and_list() {
        let repos = InMemoryRepositoryProvider::new();
        for (start, end) in [("2025-01-01", "2025-01-03"), ("2025-01-03", "2025-01-05"), ("2025-02-01", "2025-02-02")] {
            repos
                .create_checked(new_reservation(1, start, end), &|_: &[Reservation]| true)
                .await
                .unwrap();
        }

        let today = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(repos.find_current(today).await.unwrap().len(), 2);

        let plan = QueryPlan::from_query(
            &RESERVATION_SCHEMA,
            &[("start_date[gte]", "2025-01-02"), ("sort", "start_date-desc")],
            PageLimits::default(),
        )
        .unwrap();
        let page = ReservationRepository::list(&repos, &plan).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].start_date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }
}
