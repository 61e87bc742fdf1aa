pub mod fav;
pub mod list;
pub mod user;

pub use fav::{Fav, FavInput};
pub use list::{List, ListInput};
pub use user::{NewUser, User, UserPatch};

/// Numeric identifiers are assigned by the store, strictly increasing and never reused.
pub type UserId = i64;
pub type ListId = i64;
pub type FavId = i64;
