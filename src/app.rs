use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full router: public routes, token-guarded routes and the global layers.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/", get(public::status::root))
        .route("/health", get(public::status::health))
        .merge(auth_public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        .fallback(not_found)
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/signup", post(auth::signup_post))
        .route("/auth/signin", post(auth::signin_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{favs, list, users};

    Router::new()
        .route("/users/me", get(users::me_get))
        .route("/users", axum::routing::patch(users::users_patch))
        .route("/list", get(list::list_get).post(list::list_post))
        .route(
            "/list/:id",
            get(list::record_get)
                .patch(list::record_patch)
                .delete(list::record_delete),
        )
        .route("/favs/:list_id", get(favs::favs_get).post(favs::favs_post))
        .route(
            "/favs/:list_id/:id",
            get(favs::fav_get).patch(favs::fav_patch).delete(favs::fav_delete),
        )
        // route_layer so unknown paths still fall through to 404 rather than 401
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_development() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
