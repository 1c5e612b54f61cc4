//! Project path functions - single source of truth for file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! This allows running isolated server instances side by side:
//! ```bash
//! DATA_DIR=data/staging PORT=3001 cargo run
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// SQLite database holding languages and settings
pub fn db_path() -> String {
    format!("{}/url_suffix.db", data_dir())
}

/// Config file read at startup (relative to the working directory)
pub const CONFIG_FILE: &str = "config.toml";

// ==================== Admin Routes ====================

/// Language detection overview (redirect target after saving)
pub const DETECTION_ROUTE: &str = "/admin/config/regional/language/detection";

/// URL suffix configuration form
pub const URL_SUFFIX_ROUTE: &str = "/admin/config/regional/language/detection/url-suffix";

/// Selected (fallback) language configuration form
pub const SELECTED_ROUTE: &str = "/admin/config/regional/language/detection/selected";

/// Overview URL with the "saved" status message
pub fn detection_saved_url() -> String {
    format!("{}?status=saved", DETECTION_ROUTE)
}

// ==================== Tests ====================
