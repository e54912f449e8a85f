//! SeaORM implementation of ResourceRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::listing::{db_err, fetch_page};
use crate::domain::query::QueryPlan;
use crate::domain::resource::{Resource, ResourceRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::resource;
use crate::shared::PaginatedResult;

pub struct SeaOrmResourceRepository {
    db: DatabaseConnection,
}

impl SeaOrmResourceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: resource::Model) -> Resource {
    Resource {
        id: m.id,
        group_id: m.group_id,
        make: m.make,
        model: m.model,
        year: m.year,
        color: m.color,
        registration_no: m.registration_no,
        daily_rate: m.daily_rate,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl ResourceRepository for SeaOrmResourceRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Resource>> {
        let model = resource::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<Resource>> {
        let page = fetch_page::<resource::Entity, _>(&self.db, plan).await?;
        Ok(page.map(model_to_domain))
    }
}
