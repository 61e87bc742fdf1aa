// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `jwt_auth_middleware`, so handlers can rely on
// an `AuthUser` extension. Ownership is enforced in the services, never here.
pub mod favs; // /favs/:listId[/:id] - favs inside an owned list
pub mod list; // /list[/:id] - the caller's lists
pub mod users; // /users/me, /users - the caller's own profile
