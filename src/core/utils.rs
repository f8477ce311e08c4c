use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".movie_core";
const CONFIG_FILE: &str = "config.json";
const SITE_DIR: &str = "site";
const TEMPLATE_DIR: &str = "templates";

pub const HOME_ENV: &str = "MOVIE_CORE_HOME";

/// Returns the application data directory, defaulting to `~/.movie_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Default output directory for the generated gallery.
pub fn site_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(SITE_DIR)
}

/// Directory searched for user-provided gallery templates.
pub fn template_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(TEMPLATE_DIR)
}
