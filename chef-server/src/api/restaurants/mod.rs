//! Restaurant API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", restaurant_routes())
}

fn restaurant_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::directory))
        .route("/{name}/status", put(handler::set_status))
}
