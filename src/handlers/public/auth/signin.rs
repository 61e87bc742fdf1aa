use axum::extract::State;

use crate::api::validation::{SigninPayload, Valid};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AccessToken;
use crate::state::AppState;

/// POST /auth/signin - Authenticate and receive a bearer token
///
/// Unknown email and wrong password both answer 403 "Credentials incorrect".
pub async fn signin_post(
    State(state): State<AppState>,
    Valid(input): Valid<SigninPayload>,
) -> ApiResult<AccessToken> {
    let token = state.auth.signin(input).await?;
    Ok(ApiResponse::success(token))
}
