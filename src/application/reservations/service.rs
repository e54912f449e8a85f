//! Reservation lifecycle: application-layer orchestration
//!
//! Every use-case takes a [`CallContext`] and races each repository call
//! against it. Availability is decided inside the store's checked writes, so
//! two overlapping requests for the same resource cannot both be stored.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::reservation::is_available;
use crate::domain::{
    DateWindow, DomainError, DomainResult, NewReservation, PricingPolicy, RepositoryProvider,
    Reservation, Resource,
};
use crate::shared::CallContext;

const UNAVAILABLE: &str = "resource not available for selected dates";

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    pricing: PricingPolicy,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, pricing: PricingPolicy) -> Self {
        Self { repos, pricing }
    }

    pub fn pricing(&self) -> PricingPolicy {
        self.pricing
    }

    async fn resource(&self, ctx: &CallContext, resource_id: i32) -> DomainResult<Resource> {
        ctx.run("find_resource", self.repos.resources().find_by_id(resource_id))
            .await?
            .ok_or_else(|| DomainError::not_found("Resource", resource_id))
    }

    /// Book `resource_id` for `holder_id` over `[start, end]` (`YYYY-MM-DD`).
    pub async fn create(
        &self,
        ctx: &CallContext,
        holder_id: i32,
        resource_id: i32,
        start: &str,
        end: &str,
    ) -> DomainResult<Reservation> {
        ctx.run("find_holder", self.repos.holders().find_by_id(holder_id))
            .await?
            .ok_or_else(|| DomainError::not_found("Holder", holder_id))?;
        let resource = self.resource(ctx, resource_id).await?;

        let window = DateWindow::parse(start, end)?;
        let total = self.pricing.total(&window, resource.daily_rate);

        let admit = |existing: &[Reservation]| is_available(resource.id, &window, existing, None);
        let new = NewReservation {
            resource_id: resource.id,
            holder_id,
            window,
            total,
        };

        let Some(created) = ctx
            .run("create_reservation", self.repos.reservations().create_checked(new, &admit))
            .await?
        else {
            warn!(
                resource_id,
                holder_id,
                start = %window.start(),
                end = %window.end(),
                "Reservation rejected, dates overlap an existing one"
            );
            return Err(DomainError::BadRequest(UNAVAILABLE.to_string()));
        };

        info!(
            reservation_id = created.id,
            resource_id,
            holder_id,
            total = %created.total,
            "Reservation created"
        );
        Ok(created)
    }

    pub async fn get_by_id(&self, ctx: &CallContext, id: i32) -> DomainResult<Reservation> {
        ctx.run("find_reservation", self.repos.reservations().find_by_id(id))
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    pub async fn get_by_holder(
        &self,
        ctx: &CallContext,
        holder_id: i32,
    ) -> DomainResult<Vec<Reservation>> {
        let found = ctx
            .run("find_holder_reservations", self.repos.reservations().find_by_holder(holder_id))
            .await?;
        debug!(holder_id, count = found.len(), "Loaded holder reservations");
        Ok(found)
    }

    /// Move a reservation to a new window and reprice it.
    ///
    /// The new window is checked against the resource's other reservations.
    pub async fn update(
        &self,
        ctx: &CallContext,
        id: i32,
        start: &str,
        end: &str,
    ) -> DomainResult<Reservation> {
        let mut reservation = self.get_by_id(ctx, id).await?;
        let resource = self.resource(ctx, reservation.resource_id).await?;

        let window = DateWindow::parse(start, end)?;
        let total = self.pricing.total(&window, resource.daily_rate);
        reservation.reschedule(window, total);

        let admit = |existing: &[Reservation]| is_available(resource.id, &window, existing, Some(id));

        let Some(updated) = ctx
            .run("update_reservation", self.repos.reservations().update_checked(reservation, &admit))
            .await?
        else {
            warn!(
                reservation_id = id,
                resource_id = resource.id,
                start = %window.start(),
                end = %window.end(),
                "Reservation update rejected, dates overlap another one"
            );
            return Err(DomainError::BadRequest(UNAVAILABLE.to_string()));
        };

        info!(reservation_id = id, total = %updated.total, "Reservation updated");
        Ok(updated)
    }

    pub async fn delete(&self, ctx: &CallContext, id: i32) -> DomainResult<()> {
        ctx.run("delete_reservation", self.repos.reservations().delete(id)).await?;
        info!(reservation_id = id, "Reservation deleted");
        Ok(())
    }

    /// Whether `resource_id` is free for every day of `[start, end]`.
    pub async fn check_availability(
        &self,
        ctx: &CallContext,
        resource_id: i32,
        start: &str,
        end: &str,
    ) -> DomainResult<bool> {
        let resource = self.resource(ctx, resource_id).await?;
        let window = DateWindow::parse(start, end)?;

        let existing = ctx
            .run("find_resource_reservations", self.repos.reservations().find_by_resource(resource.id))
            .await?;
        Ok(is_available(resource.id, &window, &existing, None))
    }

    /// Reservations running on `today`.
    pub async fn current(
        &self,
        ctx: &CallContext,
        today: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        ctx.run("find_current_reservations", self.repos.reservations().find_current(today))
            .await
    }
}
