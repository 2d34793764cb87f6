pub mod auth;
pub mod rate_limit;

pub use auth::{identity_middleware, CurrentUser, CustomerClaims, MaybeUser};
pub use rate_limit::rate_limit_middleware;
