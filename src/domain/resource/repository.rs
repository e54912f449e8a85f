use async_trait::async_trait;

use super::model::Resource;
use crate::domain::query::QueryPlan;
use crate::shared::{DomainResult, PaginatedResult};

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Resource>>;

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<Resource>>;
}
