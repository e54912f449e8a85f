//! SeaORM implementation of HolderRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::listing::db_err;
use crate::domain::holder::{Holder, HolderRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::holder;

pub struct SeaOrmHolderRepository {
    db: DatabaseConnection,
}

impl SeaOrmHolderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HolderRepository for SeaOrmHolderRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Holder>> {
        let model = holder::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(|m| Holder {
            id: m.id,
            username: m.username,
            email: m.email,
            created_at: m.created_at,
        }))
    }
}
