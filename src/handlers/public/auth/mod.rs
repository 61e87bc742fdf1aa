// handlers/public/auth/mod.rs - Public authentication handlers
//
// Both endpoints answer with `{ access_token }`; the token is then sent as
// `Authorization: Bearer <token>` to every protected route.
pub mod signin; // POST /auth/signin - exchange credentials for a token
pub mod signup; // POST /auth/signup - create an account and receive a token

pub use signin::signin_post;
pub use signup::signup_post;
