mod config;
mod database;
mod state;

pub use config::{Config, NotificationsConfig};
pub use database::Database;
pub use state::keys;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// `CATFEEDER_HOME` wins when set. Otherwise `~/.config/catfeeder[-dev]/`
/// based on `CATFEEDER_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("CATFEEDER_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CATFEEDER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("catfeeder-dev")
            } else {
                base_dir.join("catfeeder")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
