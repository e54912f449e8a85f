//! Resource DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Resource;

/// Resource details in API responses
///
/// `registration_no` can be filtered on but is never returned.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResourceDto {
    pub id: i32,
    pub group_id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub daily_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceDto {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            group_id: r.group_id,
            make: r.make,
            model: r.model,
            year: r.year,
            color: r.color,
            daily_rate: r.daily_rate,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// First day, `YYYY-MM-DD`
    pub start_date: String,
    /// Last day (inclusive), `YYYY-MM-DD`
    pub end_date: String,
}

/// Whether a resource is free over a window, with the price it would cost
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub resource_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub available: bool,
    pub billed_days: i64,
    pub quoted_total: Decimal,
}
