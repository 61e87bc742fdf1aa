use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{FavId, ListId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fav {
    pub id: FavId,
    pub list_id: ListId,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavInput {
    pub url: String,
}
