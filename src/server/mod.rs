//! HTTP server: handlers, request-body parsing, and routes

pub mod handlers;
pub mod payload;
pub mod router;

pub use handlers::AppState;
pub use router::build_router;
