// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and service status. Every input here is untrusted and
// validated before it reaches a service.
pub mod auth;
pub mod status;
