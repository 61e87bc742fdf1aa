use axum::extract::State;

use crate::api::validation::{SignupPayload, Valid};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AccessToken;
use crate::state::AppState;

/// POST /auth/signup - Register a new user account
///
/// Expected Input:
/// ```json
/// {
///   "email": "string",      // Required: unique, well-formed
///   "password": "string",   // Required: non-empty
///   "firstName": "string",  // Optional
///   "lastName": "string"    // Optional
/// }
/// ```
///
/// 201 with `{ "access_token": "..." }`; 403 when the email is already registered.
pub async fn signup_post(
    State(state): State<AppState>,
    Valid(input): Valid<SignupPayload>,
) -> ApiResult<AccessToken> {
    let token = state.auth.signup(input).await?;
    Ok(ApiResponse::created(token))
}
