// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer token resolved to a user)
pub mod public; // No authentication required (/, /health, /auth/*)
pub mod protected; // Bearer token required (/users/*, /list/*, /favs/*)
