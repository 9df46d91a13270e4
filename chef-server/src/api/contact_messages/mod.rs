//! Contact Message API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/contact-messages", contact_routes())
}

fn contact_routes() -> Router<ServerState> {
    Router::new().route("/", post(handler::create).get(handler::list))
}
