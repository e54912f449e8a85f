//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, EntityTrait, IsolationLevel, NotSet, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::debug;

use super::listing::{db_err, fetch_page};
use crate::domain::query::QueryPlan;
use crate::domain::reservation::{Admission, NewReservation, Reservation, ReservationRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{reservation, resource};
use crate::shared::PaginatedResult;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open the transaction that guards a checked write on `resource_id`.
    ///
    /// The resource is write-locked before anything is read, so concurrent
    /// writers for the same resource queue up and each sees the rows its
    /// predecessor committed. SQLite has no row locks: a no-op update takes the
    /// database write lock (waiting out `busy_timeout`) instead. SQLite
    /// transactions are already serializable and reject an explicit isolation
    /// level.
    async fn begin_checked(&self, resource_id: i32) -> DomainResult<DatabaseTransaction> {
        let backend = self.db.get_database_backend();
        let isolation = match backend {
            DbBackend::Sqlite => None,
            _ => Some(IsolationLevel::Serializable),
        };
        let txn = self
            .db
            .begin_with_config(isolation, None)
            .await
            .map_err(db_err)?;

        let locked = match backend {
            DbBackend::Sqlite => resource::Entity::update_many()
                .col_expr(resource::Column::UpdatedAt, Expr::col(resource::Column::UpdatedAt).into())
                .filter(resource::Column::Id.eq(resource_id))
                .exec(&txn)
                .await
                .map(|_| ()),
            _ => resource::Entity::find_by_id(resource_id)
                .lock_exclusive()
                .one(&txn)
                .await
                .map(|_| ()),
        };
        if let Err(e) = locked {
            txn.rollback().await.map_err(db_err)?;
            return Err(db_err(e));
        }
        Ok(txn)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        resource_id: m.resource_id,
        holder_id: m.holder_id,
        start_date: m.start_date,
        end_date: m.end_date,
        total: m.total,
        created_at: m.created_at,
    }
}

async fn reservations_of<C: ConnectionTrait>(
    db: &C,
    resource_id: i32,
) -> DomainResult<Vec<Reservation>> {
    let models = reservation::Entity::find()
        .filter(reservation::Column::ResourceId.eq(resource_id))
        .order_by_asc(reservation::Column::StartDate)
        .order_by_asc(reservation::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?;
    Ok(models.into_iter().map(model_to_domain).collect())
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create_checked(
        &self,
        r: NewReservation,
        admit: Admission<'_>,
    ) -> DomainResult<Option<Reservation>> {
        let txn = self.begin_checked(r.resource_id).await?;

        let existing = reservations_of(&txn, r.resource_id).await?;
        if !admit(&existing) {
            txn.rollback().await.map_err(db_err)?;
            return Ok(None);
        }

        let model = reservation::ActiveModel {
            id: NotSet,
            resource_id: Set(r.resource_id),
            holder_id: Set(r.holder_id),
            start_date: Set(r.window.start()),
            end_date: Set(r.window.end()),
            total: Set(r.total),
            created_at: Set(Utc::now()),
        };
        let stored = model.insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        debug!(reservation_id = stored.id, resource_id = stored.resource_id, "Reservation row inserted");
        Ok(Some(model_to_domain(stored)))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_holder(&self, holder_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::HolderId.eq(holder_id))
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_resource(&self, resource_id: i32) -> DomainResult<Vec<Reservation>> {
        reservations_of(&self.db, resource_id).await
    }

    async fn update_checked(
        &self,
        r: Reservation,
        admit: Admission<'_>,
    ) -> DomainResult<Option<Reservation>> {
        let txn = self.begin_checked(r.resource_id).await?;

        let Some(current) = reservation::Entity::find_by_id(r.id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::not_found("Reservation", r.id));
        };

        let existing = reservations_of(&txn, current.resource_id).await?;
        if !admit(&existing) {
            txn.rollback().await.map_err(db_err)?;
            return Ok(None);
        }

        let window = r.window();
        let mut model: reservation::ActiveModel = current.into();
        model.start_date = Set(window.start());
        model.end_date = Set(window.end());
        model.total = Set(r.total);
        let stored = model.update(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(Some(model_to_domain(stored)))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = reservation::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Reservation", id));
        }
        Ok(())
    }

    async fn find_current(&self, day: NaiveDate) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::StartDate.lte(day))
            .filter(reservation::Column::EndDate.gte(day))
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<Reservation>> {
        let page = fetch_page::<reservation::Entity, _>(&self.db, plan).await?;
        Ok(page.map(model_to_domain))
    }
}
