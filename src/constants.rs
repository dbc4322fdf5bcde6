//! Application-wide constants
//!
//! String literals shared by the synchronizer, the storage backends and the
//! config loader live here so every surface agrees on the same names.

/// Durable storage constants
pub mod storage {
    /// Key under which the theme mode is persisted
    pub const THEME_KEY: &str = "theme";

    /// File name of the native key-value store
    pub const FILENAME: &str = "storage.json";
}

/// Presentation marker classes on the document root
pub mod marker {
    /// Class present while the dark theme is active
    pub const DARK_CLASS: &str = "dark";

    /// Class present while the light theme is active
    pub const LIGHT_CLASS: &str = "light";
}

/// Config file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "theme-sync";

    /// Config file name
    pub const FILENAME: &str = "theme-sync.toml";
}

/// Environment variable names
pub mod env {
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const API_BASE: &str = "THEME_SYNC_API_BASE";
    pub const SSR: &str = "THEME_SYNC_SSR";
    pub const STORE: &str = "THEME_SYNC_STORE";
}

/// Fallback values used when config does not say otherwise
pub mod defaults {
    pub const API_BASE: &str = "http://localhost:8080";
    pub const LOG_LEVEL: &str = "info";
}
