use std::sync::Arc;

use tracing::warn;

use crate::database::models::{Fav, FavId, FavInput, List, ListId, UserId};
use crate::database::{FavStore, ListStore};

use super::ownership::{check_fav_ownership, check_ownership};
use super::ServiceError;

/// Favs nested under a list. Every operation authorizes against the owner of
/// the parent list, resolved from the store rather than from the path.
#[derive(Clone)]
pub struct FavService {
    lists: Arc<dyn ListStore>,
    favs: Arc<dyn FavStore>,
}

impl FavService {
    pub fn new(lists: Arc<dyn ListStore>, favs: Arc<dyn FavStore>) -> Self {
        Self { lists, favs }
    }

    pub async fn create(
        &self,
        caller: UserId,
        list_id: ListId,
        input: FavInput,
    ) -> Result<Fav, ServiceError> {
        let parent = self.lists.find_list(list_id).await?;
        check_ownership(parent.as_ref(), caller).require().map_err(|e| {
            warn!("Ownership check failed: user {} adding fav to list {}", caller, list_id);
            e
        })?;

        self.favs
            .insert_fav(list_id, caller, &input.url)
            .await?
            .ok_or(ServiceError::Forbidden)
    }

    /// Favs of an owned list; a foreign or missing list reads as empty.
    pub async fn list_all(&self, caller: UserId, list_id: ListId) -> Result<Vec<Fav>, ServiceError> {
        let parent = self.lists.find_list(list_id).await?;
        if !check_ownership(parent.as_ref(), caller).is_allowed() {
            return Ok(Vec::new());
        }
        Ok(self.favs.favs_by_list(list_id).await?)
    }

    pub async fn get_by_id(
        &self,
        caller: UserId,
        list_id: ListId,
        id: FavId,
    ) -> Result<Option<Fav>, ServiceError> {
        let (fav, parent) = self.load(id).await?;
        if check_fav_ownership(fav.as_ref(), parent.as_ref(), list_id, caller).is_allowed() {
            Ok(fav)
        } else {
            Ok(None)
        }
    }

    pub async fn edit_by_id(
        &self,
        caller: UserId,
        list_id: ListId,
        id: FavId,
        input: FavInput,
    ) -> Result<Fav, ServiceError> {
        self.authorize(caller, list_id, id).await?;

        self.favs
            .update_fav_owned(id, list_id, caller, &input.url)
            .await?
            .ok_or(ServiceError::Forbidden)
    }

    pub async fn delete_by_id(&self, caller: UserId, list_id: ListId, id: FavId) -> Result<(), ServiceError> {
        self.authorize(caller, list_id, id).await?;

        if self.favs.delete_fav_owned(id, list_id, caller).await? {
            Ok(())
        } else {
            Err(ServiceError::Forbidden)
        }
    }

    /// Fetch the fav by its own id and the list it is actually stored under.
    async fn load(&self, id: FavId) -> Result<(Option<Fav>, Option<List>), ServiceError> {
        let fav = self.favs.find_fav(id).await?;
        let parent = match &fav {
            Some(fav) => self.lists.find_list(fav.list_id).await?,
            None => None,
        };
        Ok((fav, parent))
    }

    async fn authorize(&self, caller: UserId, list_id: ListId, id: FavId) -> Result<(), ServiceError> {
        let (fav, parent) = self.load(id).await?;
        check_fav_ownership(fav.as_ref(), parent.as_ref(), list_id, caller)
            .require()
            .map_err(|e| {
                warn!("Ownership check failed: user {} on fav {} under list {}", caller, id, list_id);
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    struct Fixture {
        store: Arc<MemoryStore>,
        favs: FavService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let favs = FavService::new(store.clone(), store.clone());
        Fixture { store, favs }
    }

    fn input(url: &str) -> FavInput {
        FavInput { url: url.to_string() }
    }

    #[tokio::test]
    async fn owner_can_create_and_read_favs() {
        let fx = fixture();
        let list = fx.store.insert_list(1, "Trip").await.unwrap();

        let fav = fx.favs.create(1, list.id, input("u1")).await.unwrap();
        assert_eq!(fav.list_id, list.id);
        assert_eq!(fav.url, "u1");

        assert_eq!(fx.favs.list_all(1, list.id).await.unwrap(), vec![fav.clone()]);
        assert_eq!(fx.favs.get_by_id(1, list.id, fav.id).await.unwrap(), Some(fav));
    }

    #[tokio::test]
    async fn create_under_foreign_or_missing_list_is_forbidden() {
        let fx = fixture();
        let list = fx.store.insert_list(1, "Trip").await.unwrap();

        assert!(matches!(
            fx.favs.create(2, list.id, input("u")).await,
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            fx.favs.create(1, list.id + 1, input("u")).await,
            Err(ServiceError::Forbidden)
        ));
        assert!(fx.store.favs_by_list(list.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_through_foreign_list_are_empty() {
        let fx = fixture();
        let list = fx.store.insert_list(1, "Trip").await.unwrap();
        let fav = fx.favs.create(1, list.id, input("u1")).await.unwrap();

        assert!(fx.favs.list_all(2, list.id).await.unwrap().is_empty());
        assert_eq!(fx.favs.get_by_id(2, list.id, fav.id).await.unwrap(), None);
        assert_eq!(fx.favs.get_by_id(1, list.id, fav.id + 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn fav_is_not_reachable_through_another_owned_list() {
        let fx = fixture();
        let trip = fx.store.insert_list(1, "Trip").await.unwrap();
        let other = fx.store.insert_list(1, "Other").await.unwrap();
        let fav = fx.favs.create(1, trip.id, input("u1")).await.unwrap();

        assert_eq!(fx.favs.get_by_id(1, other.id, fav.id).await.unwrap(), None);
        assert!(matches!(
            fx.favs.edit_by_id(1, other.id, fav.id, input("x")).await,
            Err(ServiceError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn knowing_a_valid_pair_is_not_enough_to_edit() {
        // Correct listId/favId pair, but the list belongs to user 1
        let fx = fixture();
        let list = fx.store.insert_list(1, "Trip").await.unwrap();
        let fav = fx.favs.create(1, list.id, input("u1")).await.unwrap();

        assert!(matches!(
            fx.favs.edit_by_id(2, list.id, fav.id, input("x")).await,
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            fx.favs.delete_by_id(2, list.id, fav.id).await,
            Err(ServiceError::Forbidden)
        ));
        assert_eq!(fx.store.find_fav(fav.id).await.unwrap().unwrap().url, "u1");
    }

    #[tokio::test]
    async fn owner_can_edit_and_delete() {
        let fx = fixture();
        let list = fx.store.insert_list(1, "Trip").await.unwrap();
        let fav = fx.favs.create(1, list.id, input("u1")).await.unwrap();

        let edited = fx.favs.edit_by_id(1, list.id, fav.id, input("u2")).await.unwrap();
        assert_eq!(edited.url, "u2");
        assert_eq!(edited.list_id, list.id);

        fx.favs.delete_by_id(1, list.id, fav.id).await.unwrap();
        assert_eq!(fx.favs.get_by_id(1, list.id, fav.id).await.unwrap(), None);
        assert!(matches!(
            fx.favs.delete_by_id(1, list.id, fav.id).await,
            Err(ServiceError::Forbidden)
        ));
    }
}
