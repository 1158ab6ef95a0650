pub mod auth;
pub mod cors;
pub mod timeout;

pub use auth::{AuthUser, JwtAuth};
pub use cors::create_cors;
pub use timeout::{Ctx, RequestTimeout};
