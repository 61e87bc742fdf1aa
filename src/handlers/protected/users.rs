use axum::{extract::State, Extension};

use crate::api::validation::{EditUserPayload, Valid};
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /users/me - Profile of the token's user
pub async fn me_get(Extension(auth): Extension<AuthUser>) -> ApiResult<User> {
    Ok(ApiResponse::success(auth.user))
}

/// PATCH /users - Update email or names; absent fields are left alone
pub async fn users_patch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Valid(patch): Valid<EditUserPayload>,
) -> ApiResult<User> {
    let user = state.users.edit(auth.id(), patch).await?;
    Ok(ApiResponse::success(user))
}
