pub mod auth;
pub mod cors;

pub use auth::{AuthMiddleware, AuthedAccount};
pub use cors::create_cors;
