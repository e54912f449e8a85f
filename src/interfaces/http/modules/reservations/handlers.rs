//! Reservation HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::info;

use crate::domain::reservation::parse_date;
use crate::interfaces::http::common::{
    ok, ApiError, ApiResponse, ApiResult, EmptyData, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::state::AppState;

use super::dto::*;

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Bad dates or resource not available"),
        (status = 404, description = "Holder or resource not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError> {
    let ctx = state.call_context();
    let reservation = state
        .reservations
        .create(
            &ctx,
            request.holder_id,
            request.resource_id,
            &request.start_date,
            &request.end_date,
        )
        .await?;

    info!(
        reservation_id = reservation.id,
        resource_id = reservation.resource_id,
        "Reservation created"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReservationDto::from(reservation))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-based)"),
        ("page_size" = Option<u64>, Query, description = "Items per page"),
        ("sort" = Option<String>, Query, description = "`field-asc` or `field-desc`")
    ),
    responses(
        (status = 200, description = "Page of reservations", body = ApiResponse<PaginatedResponse<ReservationDto>>),
        (status = 400, description = "Unknown field, operator or sort")
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<PaginatedResponse<ReservationDto>> {
    let ctx = state.call_context();
    let page = state.listing.reservations(&ctx, &params).await?;
    ok(page.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/current",
    tag = "Reservations",
    params(CurrentQuery),
    responses(
        (status = 200, description = "Reservations running on the day", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn current_reservations(
    State(state): State<AppState>,
    Query(query): Query<CurrentQuery>,
) -> ApiResult<Vec<ReservationDto>> {
    let day = match query.date.as_deref() {
        Some(raw) => parse_date("date", raw)?,
        None => Utc::now().date_naive(),
    };
    let ctx = state.call_context();
    let found = state.reservations.current(&ctx, day).await?;
    ok(found.into_iter().map(ReservationDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ReservationDto> {
    let ctx = state.call_context();
    let reservation = state.reservations.get_by_id(&ctx, id).await?;
    ok(reservation.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation rescheduled", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Bad dates or resource not available"),
        (status = 404, description = "Reservation or resource not found")
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateReservationRequest>,
) -> ApiResult<ReservationDto> {
    let ctx = state.call_context();
    let reservation = state
        .reservations
        .update(&ctx, id, &request.start_date, &request.end_date)
        .await?;
    info!(reservation_id = id, total = %reservation.total, "Reservation rescheduled");
    ok(reservation.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<EmptyData> {
    let ctx = state.call_context();
    state.reservations.delete(&ctx, id).await?;
    info!(reservation_id = id, "Reservation deleted");
    ok(EmptyData {})
}

#[utoipa::path(
    get,
    path = "/api/v1/holders/{id}/reservations",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Holder ID")),
    responses(
        (status = 200, description = "Reservations of the holder", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn holder_reservations(
    State(state): State<AppState>,
    Path(holder_id): Path<i32>,
) -> ApiResult<Vec<ReservationDto>> {
    let ctx = state.call_context();
    let found = state.reservations.get_by_holder(&ctx, holder_id).await?;
    ok(found.into_iter().map(ReservationDto::from).collect())
}
