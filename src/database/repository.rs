//! Storage ports used by the services.
//!
//! Mutating list and fav operations take the caller's id and only touch a row
//! when it is still owned by that caller at write time, so an ownership check
//! done earlier in the request cannot be raced by a concurrent change.

use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Fav, FavId, List, ListId, NewUser, User, UserId, UserPatch};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `DatabaseError::Conflict` when the email is already registered.
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Returns `None` when the user does not exist.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<Option<User>, DatabaseError>;
}

#[async_trait]
pub trait ListStore: Send + Sync {
    async fn insert_list(&self, owner: UserId, name: &str) -> Result<List, DatabaseError>;

    /// All lists of `owner` in insertion order.
    async fn lists_by_owner(&self, owner: UserId) -> Result<Vec<List>, DatabaseError>;

    async fn find_list(&self, id: ListId) -> Result<Option<List>, DatabaseError>;

    async fn update_list_owned(
        &self,
        id: ListId,
        owner: UserId,
        name: &str,
    ) -> Result<Option<List>, DatabaseError>;

    /// Removes the list and its favs. Returns false when nothing matched.
    async fn delete_list_owned(&self, id: ListId, owner: UserId) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait FavStore: Send + Sync {
    /// Inserts under `list_id` only if that list belongs to `owner`.
    async fn insert_fav(
        &self,
        list_id: ListId,
        owner: UserId,
        url: &str,
    ) -> Result<Option<Fav>, DatabaseError>;

    /// All favs of a list in insertion order.
    async fn favs_by_list(&self, list_id: ListId) -> Result<Vec<Fav>, DatabaseError>;

    async fn find_fav(&self, id: FavId) -> Result<Option<Fav>, DatabaseError>;

    async fn update_fav_owned(
        &self,
        id: FavId,
        list_id: ListId,
        owner: UserId,
        url: &str,
    ) -> Result<Option<Fav>, DatabaseError>;

    async fn delete_fav_owned(
        &self,
        id: FavId,
        list_id: ListId,
        owner: UserId,
    ) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
