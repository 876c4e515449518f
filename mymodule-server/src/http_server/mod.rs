//! HTTP API of the module, consumed by the remote service implementation.

mod routes;

pub use routes::router;

/// Base path of every route of the API
pub const SERVER_BASE_PATH: &str = "api";
