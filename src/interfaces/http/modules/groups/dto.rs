//! Group DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ResourceGroup;

/// Group details in API responses; contact phone and address stay private
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResourceGroup> for GroupDto {
    fn from(g: ResourceGroup) -> Self {
        Self {
            id: g.id,
            name: g.name,
            email: g.email,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}
