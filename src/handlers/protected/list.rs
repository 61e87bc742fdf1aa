use axum::{
    extract::{Path, State},
    Extension,
};

use crate::api::validation::{parse_id, ListPayload, Valid};
use crate::database::models::List;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /list - Create a list owned by the caller
pub async fn list_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Valid(input): Valid<ListPayload>,
) -> ApiResult<List> {
    let list = state.lists.create(auth.id(), input).await?;
    Ok(ApiResponse::created(list))
}

/// GET /list - All lists owned by the caller
pub async fn list_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<List>> {
    let lists = state.lists.list_all(auth.id()).await?;
    Ok(ApiResponse::success(lists))
}

/// GET /list/:id - `null` body when missing or owned by someone else
pub async fn record_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Option<List>> {
    let id = parse_id("id", &id)?;
    let list = state.lists.get_by_id(auth.id(), id).await?;
    Ok(ApiResponse::success(list))
}

/// PATCH /list/:id - Rename; 403 unless the caller owns the list
pub async fn record_patch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Valid(input): Valid<ListPayload>,
) -> ApiResult<List> {
    let id = parse_id("id", &id)?;
    let list = state.lists.edit_by_id(auth.id(), id, input).await?;
    Ok(ApiResponse::success(list))
}

/// DELETE /list/:id - Remove the list and its favs
pub async fn record_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id("id", &id)?;
    state.lists.delete_by_id(auth.id(), id).await?;
    Ok(ApiResponse::no_content())
}
