//! Group HTTP handlers

use axum::extract::{Path, Query, State};

use crate::interfaces::http::common::{ok, ApiResponse, ApiResult, PaginatedResponse};
use crate::interfaces::http::state::AppState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/v1/groups",
    tag = "Groups",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-based)"),
        ("page_size" = Option<u64>, Query, description = "Items per page"),
        ("sort" = Option<String>, Query, description = "`field-asc` or `field-desc`")
    ),
    responses(
        (status = 200, description = "Page of groups", body = ApiResponse<PaginatedResponse<GroupDto>>),
        (status = 400, description = "Unknown field, operator or sort")
    )
)]
pub async fn list_groups(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<PaginatedResponse<GroupDto>> {
    let ctx = state.call_context();
    let page = state.listing.groups(&ctx, &params).await?;
    ok(page.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/groups/{id}",
    tag = "Groups",
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group", body = ApiResponse<GroupDto>),
        (status = 404, description = "Group not found")
    )
)]
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<GroupDto> {
    let ctx = state.call_context();
    let group = state.listing.group(&ctx, id).await?;
    ok(group.into())
}
