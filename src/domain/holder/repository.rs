use async_trait::async_trait;

use super::model::Holder;
use crate::shared::DomainResult;

#[async_trait]
pub trait HolderRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Holder>>;
}
