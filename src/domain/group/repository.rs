use async_trait::async_trait;

use super::model::ResourceGroup;
use crate::domain::query::QueryPlan;
use crate::shared::{DomainResult, PaginatedResult};

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ResourceGroup>>;

    async fn list(&self, plan: &QueryPlan) -> DomainResult<PaginatedResult<ResourceGroup>>;
}
