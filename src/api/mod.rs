// API layer module (adapters for HTTP handlers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
