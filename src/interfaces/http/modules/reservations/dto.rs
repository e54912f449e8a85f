//! Reservation DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Reservation;

/// Request to book a resource
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub holder_id: i32,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub resource_id: i32,
    /// First booked day, `YYYY-MM-DD`
    #[validate(length(equal = 10, message = "expected YYYY-MM-DD"))]
    pub start_date: String,
    /// Last booked day (inclusive), `YYYY-MM-DD`
    #[validate(length(equal = 10, message = "expected YYYY-MM-DD"))]
    pub end_date: String,
}

/// Request to move a reservation to new dates
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationRequest {
    #[validate(length(equal = 10, message = "expected YYYY-MM-DD"))]
    pub start_date: String,
    #[validate(length(equal = 10, message = "expected YYYY-MM-DD"))]
    pub end_date: String,
}

/// Query for reservations running on a day
#[derive(Debug, Deserialize, IntoParams)]
pub struct CurrentQuery {
    /// Day to look at, `YYYY-MM-DD`; today (UTC) when omitted
    pub date: Option<String>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub resource_id: i32,
    pub holder_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Price of the whole booking
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            resource_id: r.resource_id,
            holder_id: r.holder_id,
            start_date: r.start_date,
            end_date: r.end_date,
            total: r.total,
            created_at: r.created_at,
        }
    }
}
