//! Key/value settings, including the URL suffix mapping

use rusqlite::{params, Connection, Result};

use super::languages::get_languages;
use crate::config::{SELECTED_LANGCODE_KEY, URL_SUFFIXES_KEY};
use crate::domain::{LanguageEntry, SuffixAssignment};
use crate::suffix::{ConfigStore, PersistError};

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
    let mut rows = stmt.query(params![key])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

// Mappings are JSON-encoded into one row, so a save is a single statement.
impl ConfigStore for Connection {
    fn get_mapping(&self, key: &str) -> std::result::Result<Option<SuffixAssignment>, PersistError> {
        get_setting(self, key)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(PersistError::from)
    }

    fn set_mapping(&self, key: &str, value: &SuffixAssignment) -> std::result::Result<(), PersistError> {
        let raw = serde_json::to_string(value)?;
        set_setting(self, key, &raw)?;
        Ok(())
    }
}

// ==================== URL Suffixes ====================

pub fn get_url_suffixes(conn: &Connection) -> std::result::Result<Option<SuffixAssignment>, PersistError> {
    conn.get_mapping(URL_SUFFIXES_KEY)
}

// ==================== Fallback Language ====================

pub fn get_selected_langcode(conn: &Connection) -> Result<Option<String>> {
    get_setting(conn, SELECTED_LANGCODE_KEY)
}

pub fn set_selected_langcode(conn: &Connection, langcode: &str) -> Result<()> {
    set_setting(conn, SELECTED_LANGCODE_KEY, langcode)
}

/// Language whose suffix may be blank: the selected one while it is still
/// registered, else the default language
pub fn fallback_langcode(conn: &Connection, languages: &[LanguageEntry]) -> Result<String> {
    if let Some(code) = get_selected_langcode(conn)? {
        if languages.iter().any(|l| l.code == code) {
            return Ok(code);
        }
        tracing::warn!("Selected fallback language {} is not registered, using the default language", code);
    }
    Ok(languages
        .iter()
        .find(|l| l.is_default)
        .map(|l| l.code.clone())
        .unwrap_or_default())
}

/// Store the configured fallback language unless one is already selected.
///
/// Codes missing from the registry are skipped. Returns whether the setting
/// was written.
pub fn apply_configured_fallback(conn: &Connection, langcode: &str) -> Result<bool> {
    if get_selected_langcode(conn)?.is_some() {
        return Ok(false);
    }
    if !get_languages(conn)?.iter().any(|l| l.code == langcode) {
        tracing::warn!("Configured fallback language {} is not registered, ignoring it", langcode);
        return Ok(false);
    }
    set_selected_langcode(conn, langcode)?;
    tracing::info!("Fallback language set to {}", langcode);
    Ok(true)
}
