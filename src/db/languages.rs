//! Language registry backed by the `languages` table

use rusqlite::{params, Connection, Result};
use std::collections::HashSet;

use crate::config::LanguageSeed;
use crate::domain::LanguageEntry;

/// All configured languages, ordered by weight then name
pub fn get_languages(conn: &Connection) -> Result<Vec<LanguageEntry>> {
  let mut stmt = conn.prepare("SELECT code, name, is_default FROM languages ORDER BY weight, name")?;
  let languages = stmt
    .query_map([], |row| {
      Ok(LanguageEntry {
        code: row.get(0)?,
        name: row.get(1)?,
        is_default: row.get(2)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;
  Ok(languages)
}

pub fn get_default_language(conn: &Connection) -> Result<Option<LanguageEntry>> {
  Ok(get_languages(conn)?.into_iter().find(|l| l.is_default))
}

/// Make the registry match the configured language list.
///
/// New codes are inserted, existing ones get the configured name and weight,
/// and codes no longer configured are removed. Afterwards exactly one
/// language is the default: the seed marked `default`, else the current
/// default if still configured, else the first seed. An empty list leaves
/// the registry untouched. Returns the number of newly inserted languages.
pub fn seed_languages(conn: &Connection, seeds: &[LanguageSeed]) -> Result<usize> {
  if seeds.is_empty() {
    tracing::warn!("No languages configured, keeping the registered ones");
    return Ok(0);
  }

  let tx = conn.unchecked_transaction()?;

  let existing: HashSet<String> = {
    let mut stmt = tx.prepare("SELECT code FROM languages")?;
    let codes = stmt
      .query_map([], |row| row.get(0))?
      .collect::<Result<HashSet<String>>>()?;
    codes
  };

  let mut inserted = 0;
  for seed in seeds {
    if !existing.contains(&seed.code) {
      inserted += 1;
    }
    tx.execute(
      "INSERT INTO languages (code, name, weight, is_default) VALUES (?1, ?2, ?3, 0)
       ON CONFLICT(code) DO UPDATE SET name = excluded.name, weight = excluded.weight",
      params![seed.code, seed.name, seed.weight],
    )?;
  }

  let configured: HashSet<&str> = seeds.iter().map(|s| s.code.as_str()).collect();
  let mut removed = Vec::new();
  for code in existing.iter().filter(|c| !configured.contains(c.as_str())) {
    tx.execute("DELETE FROM languages WHERE code = ?1", params![code])?;
    removed.push(code.as_str());
  }

  let has_default: bool = tx.query_row(
    "SELECT COUNT(*) > 0 FROM languages WHERE is_default = 1",
    [],
    |row| row.get(0),
  )?;
  let new_default = seeds
    .iter()
    .find(|s| s.is_default)
    .or_else(|| if has_default { None } else { seeds.first() });

  if let Some(seed) = new_default {
    tx.execute(
      "UPDATE languages SET is_default = (code = ?1)",
      params![seed.code],
    )?;
  }

  tx.commit()?;

  if inserted > 0 {
    tracing::info!("Registered {} new languages", inserted);
  }
  if !removed.is_empty() {
    removed.sort_unstable();
    tracing::info!("Removed languages no longer configured: {}", removed.join(", "));
  }
  Ok(inserted)
}
