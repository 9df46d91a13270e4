//! TableauChef Server - restaurant back-office core
//!
//! # Architecture overview
//!
//! - **Register sessions** (`register`): daily cash-drawer lifecycle and
//!   journal writing
//! - **Stock ledger** (`stock`): inventory mutations and the
//!   threshold-edge low-stock alert
//! - **Tenants** (`tenants`): restaurant directory projection and batch
//!   status toggles
//! - **Live hub** (`live`): in-process change notifications with explicit
//!   subscription release
//! - **Database** (`db`): embedded SurrealDB storage and repositories
//! - **Auth** (`auth`): JWT + Argon2, role capability sets, provisioning
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module structure
//!
//! ```text
//! chef-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, capabilities, provisioning
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! ├── live/          # change-notification hub
//! ├── register/      # cash-drawer lifecycle
//! ├── stock/         # stock ledger
//! ├── tenants/       # restaurant administration
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod live;
pub mod register;
pub mod stock;
pub mod tenants;
pub mod utils;

// Re-export common types
pub use auth::{Capability, CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use live::{ChangeEvent, SubscriptionHub};
pub use register::RegisterManager;
pub use stock::{StockMutation, StockService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), None);
}

pub fn print_banner() {
    println!(
        r#"
  ______      __    __
 /_  __/___ _/ /_  / /__  ____ ___  __
  / / / __ `/ __ \/ / _ \/ __ `/ / / /
 / / / /_/ / /_/ / /  __/ /_/ / /_/ /
/_/  \__,_/_.___/_/\___/\__,_/\__,_/
   ________          ____
  / ____/ /_  ___  / __/
 / /   / __ \/ _ \/ /_
/ /___/ / / /  __/ __/
\____/_/ /_/\___/_/
    "#
    );
}
