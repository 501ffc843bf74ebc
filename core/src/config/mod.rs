//! Configuration management
//!
//! Two YAML files feed a session: a global one under the user's config
//! directory and an optional `.askai.yaml` in the working directory.

pub mod store;

pub use store::{Config, Overrides, ResolvedConfig, SystemMessage};

use std::path::PathBuf;

/// File name of the per-directory config
pub const LOCAL_CONFIG_FILE: &str = ".askai.yaml";

/// File name of the global config inside the config directory
pub const GLOBAL_CONFIG_FILE: &str = "config.yaml";

/// Get the configuration directory path
pub fn get_config_dir() -> Option<PathBuf> {
    use dirs::config_dir;
    use home::home_dir;

    if let Some(dir) = config_dir() {
        return Some(dir.join("askai"));
    }

    if let Some(home) = home_dir() {
        return Some(home.join(".config").join("askai"));
    }

    None
}

/// Path of the global config file, if a config directory can be found
pub fn global_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}

/// Path of the local config file (relative to the working directory)
pub fn local_config_path() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG_FILE)
}
