//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.
//! The language list only comes from config.toml; it seeds the language
//! registry on startup.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::paths;

// ==================== Settings Keys ====================

/// Settings key holding the language code -> path suffix mapping
pub const URL_SUFFIXES_KEY: &str = "url_suffixes";

/// Settings key holding the detection fallback language code
pub const SELECTED_LANGCODE_KEY: &str = "selected_langcode";

/// Maximum length of a single path suffix (characters)
pub const SUFFIX_MAX_LENGTH: usize = 64;

// ==================== Server Defaults ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Base URL shown in front of the suffix fields
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// ==================== File Structure ====================

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
  database: Option<DatabaseSection>,
  server: Option<ServerSection>,
  site: Option<SiteSection>,
  #[serde(default)]
  languages: Vec<LanguageSeed>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
  path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
  addr: Option<String>,
  port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct SiteSection {
  base_url: Option<String>,
  fallback_langcode: Option<String>,
}

/// A language entry from the `[[languages]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageSeed {
  pub code: String,
  pub name: String,
  #[serde(default)]
  pub weight: i64,
  #[serde(default, rename = "default")]
  pub is_default: bool,
}

impl LanguageSeed {
  pub fn new(code: &str, name: &str, weight: i64, is_default: bool) -> Self {
    Self {
      code: code.to_string(),
      name: name.to_string(),
      weight,
      is_default,
    }
  }
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_path: PathBuf,
  pub server_addr: String,
  pub server_port: u16,
  pub base_url: String,
  pub fallback_langcode: Option<String>,
  pub languages: Vec<LanguageSeed>,
}

impl AppConfig {
  /// Get the full server bind address
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.server_addr, self.server_port)
  }
}

/// Load configuration from config.toml and the environment
pub fn load() -> AppConfig {
  // Load .env file if present
  let _ = dotenvy::dotenv();
  load_from(Path::new(paths::CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Load configuration from a specific file, with `env` providing overrides.
///
/// A missing or unparsable file is not fatal: a warning is logged and the
/// environment and defaults apply.
pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> AppConfig {
  let file = match std::fs::read_to_string(path) {
    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
      Ok(file) => {
        tracing::info!("Using configuration from {}", path.display());
        file
      }
      Err(e) => {
        tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
        ConfigFile::default()
      }
    },
    Err(_) => ConfigFile::default(),
  };
  resolve(file, env)
}

fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> AppConfig {
  let database_path = file
    .database
    .and_then(|db| db.path)
    .or_else(|| env("DATABASE_PATH"))
    .unwrap_or_else(paths::db_path);

  let (file_addr, file_port) = file
    .server
    .map(|s| (s.addr, s.port))
    .unwrap_or((None, None));
  let server_addr = file_addr
    .or_else(|| env("SERVER_ADDR"))
    .unwrap_or_else(|| SERVER_ADDR.to_string());
  let server_port = file_port
    .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
    .unwrap_or(SERVER_PORT);

  let (file_base_url, fallback_langcode) = file
    .site
    .map(|s| (s.base_url, s.fallback_langcode))
    .unwrap_or((None, None));
  let base_url = file_base_url
    .or_else(|| env("BASE_URL"))
    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

  let languages = if file.languages.is_empty() {
    vec![LanguageSeed::new("en", "English", 0, true)]
  } else {
    file.languages
  };

  AppConfig {
    database_path: PathBuf::from(database_path),
    server_addr,
    server_port,
    // Field prefix is "{base_url}/index_", so a trailing slash would double up
    base_url: base_url.trim_end_matches('/').to_string(),
    fallback_langcode,
    languages,
  }
}
