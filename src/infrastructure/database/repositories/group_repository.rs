//! SeaORM implementation of GroupRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::listing::{db_err, fetch_page};
use crate::domain::group::{GroupRepository, ResourceGroup};
use crate::domain::query::QueryPlan;
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::resource_group;
use crate::shared::PaginatedResult;

pub struct SeaOrmGroupRepository {
    db: DatabaseConnection,
}

impl SeaOrmGroupRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: resource_group::Model) -> ResourceGroup {
    ResourceGroup {
        id: m.id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        address: m.address,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl GroupRepository for SeaOrmGroupRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ResourceGroup>> {
        let model = resource_group::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<ResourceGroup>> {
        let page = fetch_page::<resource_group::Entity, _>(&self.db, plan).await?;
        Ok(page.map(model_to_domain))
    }
}
