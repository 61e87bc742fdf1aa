use std::sync::Arc;

use tracing::warn;

use crate::database::models::{List, ListId, ListInput, UserId};
use crate::database::ListStore;

use super::ownership::check_ownership;
use super::ServiceError;

#[derive(Clone)]
pub struct ListService {
    lists: Arc<dyn ListStore>,
}

impl ListService {
    pub fn new(lists: Arc<dyn ListStore>) -> Self {
        Self { lists }
    }

    pub async fn create(&self, caller: UserId, input: ListInput) -> Result<List, ServiceError> {
        Ok(self.lists.insert_list(caller, &input.name).await?)
    }

    pub async fn list_all(&self, caller: UserId) -> Result<Vec<List>, ServiceError> {
        Ok(self.lists.lists_by_owner(caller).await?)
    }

    /// Foreign and missing lists both read as `None`.
    pub async fn get_by_id(&self, caller: UserId, id: ListId) -> Result<Option<List>, ServiceError> {
        let list = self.lists.find_list(id).await?;
        Ok(list.filter(|list| list.user_id == caller))
    }

    pub async fn edit_by_id(
        &self,
        caller: UserId,
        id: ListId,
        input: ListInput,
    ) -> Result<List, ServiceError> {
        self.authorize(caller, id).await?;

        // The owner may have changed since the check; the update is conditional.
        self.lists
            .update_list_owned(id, caller, &input.name)
            .await?
            .ok_or(ServiceError::Forbidden)
    }

    pub async fn delete_by_id(&self, caller: UserId, id: ListId) -> Result<(), ServiceError> {
        self.authorize(caller, id).await?;

        if self.lists.delete_list_owned(id, caller).await? {
            Ok(())
        } else {
            Err(ServiceError::Forbidden)
        }
    }

    async fn authorize(&self, caller: UserId, id: ListId) -> Result<(), ServiceError> {
        let list = self.lists.find_list(id).await?;
        check_ownership(list.as_ref(), caller).require().map_err(|e| {
            warn!("Ownership check failed: user {} on list {}", caller, id);
            e
        })
    }
}
