use axum::{
    extract::{Path, State},
    Extension,
};

use crate::api::validation::{parse_id, FavPayload, Valid};
use crate::database::models::Fav;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

fn parse_fav_path(list_id: &str, id: &str) -> Result<(i64, i64), ApiError> {
    Ok((parse_id("listId", list_id)?, parse_id("id", id)?))
}

/// POST /favs/:listId - Add a fav to a list the caller owns
pub async fn favs_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(list_id): Path<String>,
    Valid(input): Valid<FavPayload>,
) -> ApiResult<Fav> {
    let list_id = parse_id("listId", &list_id)?;
    let fav = state.favs.create(auth.id(), list_id, input).await?;
    Ok(ApiResponse::created(fav))
}

/// GET /favs/:listId - Favs of the list, empty for lists the caller does not own
pub async fn favs_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(list_id): Path<String>,
) -> ApiResult<Vec<Fav>> {
    let list_id = parse_id("listId", &list_id)?;
    let favs = state.favs.list_all(auth.id(), list_id).await?;
    Ok(ApiResponse::success(favs))
}

/// GET /favs/:listId/:id
pub async fn fav_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, id)): Path<(String, String)>,
) -> ApiResult<Option<Fav>> {
    let (list_id, id) = parse_fav_path(&list_id, &id)?;
    let fav = state.favs.get_by_id(auth.id(), list_id, id).await?;
    Ok(ApiResponse::success(fav))
}

/// PATCH /favs/:listId/:id - Replace the url; 403 unless the fav sits in an owned list
pub async fn fav_patch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, id)): Path<(String, String)>,
    Valid(input): Valid<FavPayload>,
) -> ApiResult<Fav> {
    let (list_id, id) = parse_fav_path(&list_id, &id)?;
    let fav = state.favs.edit_by_id(auth.id(), list_id, id, input).await?;
    Ok(ApiResponse::success(fav))
}

/// DELETE /favs/:listId/:id
pub async fn fav_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, id)): Path<(String, String)>,
) -> ApiResult<()> {
    let (list_id, id) = parse_fav_path(&list_id, &id)?;
    state.favs.delete_by_id(auth.id(), list_id, id).await?;
    Ok(ApiResponse::no_content())
}
