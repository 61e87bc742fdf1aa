use std::sync::Arc;

use crate::database::models::{User, UserId, UserPatch};
use crate::database::{DatabaseError, UserStore};

use super::ServiceError;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn edit(&self, caller: UserId, patch: UserPatch) -> Result<User, ServiceError> {
        match self.users.update_user(caller, patch).await {
            Ok(Some(user)) => Ok(user),
            // Authenticated a moment ago, gone now
            Ok(None) => Err(ServiceError::Unauthenticated("User no longer exists".to_string())),
            Err(DatabaseError::Conflict(_)) => Err(ServiceError::CredentialsTaken),
            Err(e) => Err(e.into()),
        }
    }
}
