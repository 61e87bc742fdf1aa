//! Ownership guard shared by the list and fav services.
//!
//! The guard is a pure decision over records the caller of the guard already
//! fetched by their own id. A missing record is denied exactly like a record
//! owned by someone else, so a denial never tells the caller whether the id
//! exists.

use crate::database::models::{Fav, List, ListId, UserId};

use super::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allow
    }

    /// `Deny` becomes `ServiceError::Forbidden`.
    pub fn require(self) -> Result<(), ServiceError> {
        match self {
            Access::Allow => Ok(()),
            Access::Deny => Err(ServiceError::Forbidden),
        }
    }
}

/// A record with a single owning user
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

impl Owned for List {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

pub fn check_ownership<R: Owned>(record: Option<&R>, caller: UserId) -> Access {
    match record {
        Some(record) if record.owner_id() == caller => Access::Allow,
        _ => Access::Deny,
    }
}

/// Favs are owned through their parent list.
///
/// `parent` must be the list stored as the fav's parent, not whatever the path
/// named. `scope` is the list id from the request path; it has to agree with
/// the stored parent as well, so a fav is only reachable under its real list.
pub fn check_fav_ownership(
    fav: Option<&Fav>,
    parent: Option<&List>,
    scope: ListId,
    caller: UserId,
) -> Access {
    match (fav, parent) {
        (Some(fav), Some(parent)) if fav.list_id == parent.id && fav.list_id == scope => {
            check_ownership(Some(parent), caller)
        }
        _ => Access::Deny,
    }
}
