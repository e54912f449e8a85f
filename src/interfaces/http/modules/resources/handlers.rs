//! Resource HTTP handlers

use axum::extract::{Path, Query, State};

use crate::domain::DateWindow;
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult, PaginatedResponse};
use crate::interfaces::http::state::AppState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/v1/resources",
    tag = "Resources",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-based)"),
        ("page_size" = Option<u64>, Query, description = "Items per page"),
        ("sort" = Option<String>, Query, description = "`field-asc` or `field-desc`")
    ),
    responses(
        (status = 200, description = "Page of resources", body = ApiResponse<PaginatedResponse<ResourceDto>>),
        (status = 400, description = "Unknown field, operator or sort")
    )
)]
pub async fn list_resources(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<PaginatedResponse<ResourceDto>> {
    let ctx = state.call_context();
    let page = state.listing.resources(&ctx, &params).await?;
    ok(page.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/{id}",
    tag = "Resources",
    params(("id" = i32, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource", body = ApiResponse<ResourceDto>),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ResourceDto> {
    let ctx = state.call_context();
    let resource = state.listing.resource(&ctx, id).await?;
    ok(resource.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/{id}/availability",
    tag = "Resources",
    params(("id" = i32, Path, description = "Resource ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Availability and quoted price", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Malformed or inverted dates"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn resource_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<AvailabilityDto> {
    let window = DateWindow::parse(&query.start_date, &query.end_date)?;
    let ctx = state.call_context();

    let resource = state.listing.resource(&ctx, id).await?;
    let available = state
        .reservations
        .check_availability(&ctx, id, &query.start_date, &query.end_date)
        .await?;
    let pricing = state.reservations.pricing();

    ok(AvailabilityDto {
        resource_id: resource.id,
        start_date: window.start(),
        end_date: window.end(),
        available,
        billed_days: pricing.days(&window),
        quoted_total: pricing.total(&window, resource.daily_rate),
    })
}
