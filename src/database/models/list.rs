use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{ListId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInput {
    pub name: String,
}
