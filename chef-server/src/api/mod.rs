//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - login and session inspection
//! - [`users`] - account management
//! - [`restaurants`] - tenant directory and batch status toggle
//! - [`register`] - cash-drawer lifecycle
//! - [`inventory`] - inventory CRUD and stock mutations
//! - [`products`] - catalog CRUD
//! - [`journals`] - register journal history
//! - [`notifications`] - notification list / mark-read
//! - [`contact_messages`] - marketing-site contact inbox
//! - [`live`] - server-sent change events

pub mod auth;
pub mod contact_messages;
pub mod health;
pub mod inventory;
pub mod journals;
pub mod live;
pub mod notifications;
pub mod products;
pub mod register;
pub mod restaurants;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full application router
pub fn app(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(restaurants::router())
        .merge(register::router())
        .merge(inventory::router())
        .merge(products::router())
        .merge(journals::router())
        .merge(notifications::router())
        .merge(contact_messages::router())
        .merge(live::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
