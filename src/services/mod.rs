pub mod auth_service;
pub mod fav_service;
pub mod list_service;
pub mod ownership;
pub mod user_service;

pub use auth_service::{AccessToken, AuthService, SigninInput, SignupInput};
pub use fav_service::FavService;
pub use list_service::ListService;
pub use ownership::Access;
pub use user_service::UserService;

use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// Domain outcomes of a service call that are not a plain success
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Access denied.")]
    Forbidden,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Credentials taken")]
    CredentialsTaken,

    #[error("Credentials incorrect")]
    CredentialsIncorrect,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
