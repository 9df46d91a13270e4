//! TableauChef - Tauri desktop shell
//!
//! Wraps the web UI and exposes two things to it:
//! - the window bridge (minimize / toggle-maximize / close)
//! - thin command wrappers that forward UI actions to the chef-server
//!   over HTTP via the [`core::ClientBridge`]

use std::sync::Arc;
use tauri::Manager;
use tokio::sync::RwLock;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod commands;
pub mod core;

use core::ClientBridge;

const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // 1. Logging: daily file + stdout
            let log_dir = app.path().app_data_dir()?.join("logs");
            std::fs::create_dir_all(&log_dir)
                .map_err(|e| format!("Failed to create logs directory: {}", e))?;

            let file_appender = rolling::daily(&log_dir, "tableau-shell.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            // Keep the writer guard alive for the whole app lifetime
            Box::leak(Box::new(guard));

            let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                if cfg!(debug_assertions) {
                    EnvFilter::new("info,tao=error,tableau_shell_lib=debug")
                } else {
                    EnvFilter::new("warn,tao=error")
                }
            });

            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(non_blocking_file);
            let stdout_layer = fmt::layer().with_target(true).with_writer(std::io::stdout);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(stdout_layer)
                .init();

            // 2. Bridge to the chef-server
            let server_url = std::env::var("TABLEAUCHEF_SERVER_URL")
                .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
            tracing::info!(server_url, "TableauChef shell starting");

            let bridge = Arc::new(RwLock::new(ClientBridge::new(server_url)));
            app.manage(bridge);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Window bridge
            commands::window_minimize,
            commands::window_toggle_maximize,
            commands::window_close,
            // Auth
            commands::login,
            commands::logout,
            commands::current_user,
            // Register
            commands::register_status,
            commands::open_register,
            commands::compute_variance,
            commands::close_register,
            commands::list_journals,
            // Inventory and notifications
            commands::list_inventory,
            commands::restock_item,
            commands::consume_item,
            commands::recount_item,
            commands::list_notifications,
            commands::mark_notification_read,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
