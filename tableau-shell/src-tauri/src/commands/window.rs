//! Window bridge commands
//!
//! The shell window is undecorated; the web UI draws its own title bar
//! and calls these three operations. They return nothing and signal no
//! errors: a window control that fails has nothing useful to tell the UI.

#[tauri::command]
pub fn window_minimize(window: tauri::Window) {
    let _ = window.minimize();
}

#[tauri::command]
pub fn window_toggle_maximize(window: tauri::Window) {
    match window.is_maximized() {
        Ok(true) => {
            let _ = window.unmaximize();
        }
        Ok(false) => {
            let _ = window.maximize();
        }
        Err(_) => {}
    }
}

#[tauri::command]
pub fn window_close(window: tauri::Window) {
    let _ = window.close();
}
