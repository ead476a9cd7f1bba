pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
mod routes;

pub use errors::ApiError;
pub use handlers::*;
pub use models::*;
pub use routes::routes;
