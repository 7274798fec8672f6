//! Route table for the menu service

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::handlers::{
    AppState, create_menu, delete_menu, list_menu, readiness, update_menu,
};

/// Build the Axum router with all menu routes.
///
/// CORS is permissive (the service is consumed by a browser front-end on
/// another origin) and every request is traced.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(readiness))
        .route("/menu", get(list_menu).post(create_menu))
        .route("/menu/{id}", put(update_menu).delete(delete_menu))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
