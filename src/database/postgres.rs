use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Fav, FavId, List, ListId, NewUser, User, UserId, UserPatch};
use super::repository::{FavStore, HealthCheck, ListStore, UserStore};

const USER_COLUMNS: &str = "id, email, hash, first_name, last_name, created_at, updated_at";
const LIST_COLUMNS: &str = "id, user_id, name, created_at, updated_at";
const FAV_COLUMNS: &str = "f.id, f.list_id, f.url, f.created_at, f.updated_at";

/// Postgres-backed store. Owned mutations are single conditional statements.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (email, hash, first_name, last_name) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                updated_at = now()
             WHERE id = $1
             RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&patch.email)
            .bind(&patch.first_name)
            .bind(&patch.last_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl ListStore for PgStore {
    async fn insert_list(&self, owner: UserId, name: &str) -> Result<List, DatabaseError> {
        let sql = format!(
            "INSERT INTO lists (user_id, name) VALUES ($1, $2) RETURNING {}",
            LIST_COLUMNS
        );
        let row = sqlx::query_as::<_, List>(&sql)
            .bind(owner)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn lists_by_owner(&self, owner: UserId) -> Result<Vec<List>, DatabaseError> {
        let sql = format!("SELECT {} FROM lists WHERE user_id = $1 ORDER BY id", LIST_COLUMNS);
        let rows = sqlx::query_as::<_, List>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_list(&self, id: ListId) -> Result<Option<List>, DatabaseError> {
        let sql = format!("SELECT {} FROM lists WHERE id = $1", LIST_COLUMNS);
        let row = sqlx::query_as::<_, List>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_list_owned(
        &self,
        id: ListId,
        owner: UserId,
        name: &str,
    ) -> Result<Option<List>, DatabaseError> {
        let sql = format!(
            "UPDATE lists SET name = $3, updated_at = now() WHERE id = $1 AND user_id = $2 RETURNING {}",
            LIST_COLUMNS
        );
        let row = sqlx::query_as::<_, List>(&sql)
            .bind(id)
            .bind(owner)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_list_owned(&self, id: ListId, owner: UserId) -> Result<bool, DatabaseError> {
        // favs go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM lists WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl FavStore for PgStore {
    async fn insert_fav(
        &self,
        list_id: ListId,
        owner: UserId,
        url: &str,
    ) -> Result<Option<Fav>, DatabaseError> {
        let sql = format!(
            "INSERT INTO favs AS f (list_id, url)
             SELECT l.id, $3 FROM lists l WHERE l.id = $1 AND l.user_id = $2
             RETURNING {}",
            FAV_COLUMNS
        );
        let row = sqlx::query_as::<_, Fav>(&sql)
            .bind(list_id)
            .bind(owner)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn favs_by_list(&self, list_id: ListId) -> Result<Vec<Fav>, DatabaseError> {
        let sql = format!("SELECT {} FROM favs f WHERE f.list_id = $1 ORDER BY f.id", FAV_COLUMNS);
        let rows = sqlx::query_as::<_, Fav>(&sql)
            .bind(list_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_fav(&self, id: FavId) -> Result<Option<Fav>, DatabaseError> {
        let sql = format!("SELECT {} FROM favs f WHERE f.id = $1", FAV_COLUMNS);
        let row = sqlx::query_as::<_, Fav>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_fav_owned(
        &self,
        id: FavId,
        list_id: ListId,
        owner: UserId,
        url: &str,
    ) -> Result<Option<Fav>, DatabaseError> {
        let sql = format!(
            "UPDATE favs f SET url = $4, updated_at = now()
             FROM lists l
             WHERE f.id = $1 AND f.list_id = $2 AND l.id = f.list_id AND l.user_id = $3
             RETURNING {}",
            FAV_COLUMNS
        );
        let row = sqlx::query_as::<_, Fav>(&sql)
            .bind(id)
            .bind(list_id)
            .bind(owner)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_fav_owned(
        &self,
        id: FavId,
        list_id: ListId,
        owner: UserId,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM favs f USING lists l
             WHERE f.id = $1 AND f.list_id = $2 AND l.id = f.list_id AND l.user_id = $3",
        )
        .bind(id)
        .bind(list_id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
