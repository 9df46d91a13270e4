//! Register API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/register", register_routes())
}

fn register_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::status))
        .route("/open", post(handler::open))
        .route("/variance", post(handler::variance))
        .route("/close", post(handler::close))
}
