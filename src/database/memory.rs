use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{Fav, FavId, List, ListId, NewUser, User, UserId, UserPatch};
use super::repository::{FavStore, HealthCheck, ListStore, UserStore};

/// Process-local store used by tests and `--memory` runs.
///
/// Maps are keyed by id, and ids only grow, so iteration order is insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    lists: BTreeMap<ListId, List>,
    favs: BTreeMap<FavId, Fav>,
    last_user_id: UserId,
    last_list_id: ListId,
    last_fav_id: FavId,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn owns_list(&self, list_id: ListId, owner: UserId) -> bool {
        self.lists
            .get(&list_id)
            .is_some_and(|list| list.user_id == owner)
    }

    fn owns_fav(&self, id: FavId, list_id: ListId, owner: UserId) -> bool {
        self.favs
            .get(&id)
            .is_some_and(|fav| fav.list_id == list_id && self.owns_list(list_id, owner))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(DatabaseError::Conflict(format!("email '{}' already registered", user.email)));
        }

        let now = Utc::now();
        let record = User {
            id: next_id(&mut tables.last_user_id),
            email: user.email,
            hash: user.hash,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<Option<User>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &patch.email {
            if tables.email_taken(email, Some(id)) {
                return Err(DatabaseError::Conflict(format!("email '{}' already registered", email)));
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = Some(last_name);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl ListStore for MemoryStore {
    async fn insert_list(&self, owner: UserId, name: &str) -> Result<List, DatabaseError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let list = List {
            id: next_id(&mut tables.last_list_id),
            user_id: owner,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn lists_by_owner(&self, owner: UserId) -> Result<Vec<List>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .lists
            .values()
            .filter(|list| list.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find_list(&self, id: ListId) -> Result<Option<List>, DatabaseError> {
        Ok(self.tables.read().await.lists.get(&id).cloned())
    }

    async fn update_list_owned(
        &self,
        id: ListId,
        owner: UserId,
        name: &str,
    ) -> Result<Option<List>, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.lists.get_mut(&id) {
            Some(list) if list.user_id == owner => {
                list.name = name.to_string();
                list.updated_at = Utc::now();
                Ok(Some(list.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_list_owned(&self, id: ListId, owner: UserId) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_list(id, owner) {
            return Ok(false);
        }
        tables.lists.remove(&id);
        tables.favs.retain(|_, fav| fav.list_id != id);
        Ok(true)
    }
}

#[async_trait]
impl FavStore for MemoryStore {
    async fn insert_fav(
        &self,
        list_id: ListId,
        owner: UserId,
        url: &str,
    ) -> Result<Option<Fav>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_list(list_id, owner) {
            return Ok(None);
        }

        let now = Utc::now();
        let fav = Fav {
            id: next_id(&mut tables.last_fav_id),
            list_id,
            url: url.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.favs.insert(fav.id, fav.clone());
        Ok(Some(fav))
    }

    async fn favs_by_list(&self, list_id: ListId) -> Result<Vec<Fav>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .favs
            .values()
            .filter(|fav| fav.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn find_fav(&self, id: FavId) -> Result<Option<Fav>, DatabaseError> {
        Ok(self.tables.read().await.favs.get(&id).cloned())
    }

    async fn update_fav_owned(
        &self,
        id: FavId,
        list_id: ListId,
        owner: UserId,
        url: &str,
    ) -> Result<Option<Fav>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_fav(id, list_id, owner) {
            return Ok(None);
        }
        Ok(tables.favs.get_mut(&id).map(|fav| {
            fav.url = url.to_string();
            fav.updated_at = Utc::now();
            fav.clone()
        }))
    }

    async fn delete_fav_owned(
        &self,
        id: FavId,
        list_id: ListId,
        owner: UserId,
    ) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_fav(id, list_id, owner) {
            return Ok(false);
        }
        Ok(tables.favs.remove(&id).is_some())
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
