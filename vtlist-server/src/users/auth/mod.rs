pub mod handlers;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtKeys};
pub use middleware::{auth_middleware, optional_auth_middleware};
