//! Test utilities for database setup.
//!
//! Reuses the authoritative schema and seeding code so tests never carry
//! their own copy of the tables.

use std::path::Path;

use tempfile::TempDir;

use crate::config::LanguageSeed;
use crate::db::{self, DbPool};
use crate::state::AppState;

/// Base URL used by test states
pub const TEST_BASE_URL: &str = "https://example.com";

/// Test environment with a migrated database seeded with en (default), fr and de.
///
/// The database lives in a temporary directory that is removed on drop.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pub pool: DbPool,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        Self::with_languages(&[
            LanguageSeed::new("en", "English", 0, true),
            LanguageSeed::new("fr", "French", 1, false),
            LanguageSeed::new("de", "German", 2, false),
        ])
    }

    pub fn with_languages(seeds: &[LanguageSeed]) -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let pool = db::init_db(&temp.path().join("url_suffix.db"))?;
        {
            let conn = pool.lock().expect("fresh test database lock");
            db::seed_languages(&conn, seeds)?;
        }

        Ok(Self { temp, pool })
    }

    /// Application state over this environment's database
    pub fn state(&self) -> AppState {
        AppState::new(self.pool.clone(), TEST_BASE_URL)
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_on_disk() {
        let env = TestEnv::new().unwrap();
        assert!(env.path().join("url_suffix.db").exists());
        assert_eq!(db::get_languages(&env.pool.lock().unwrap()).unwrap().len(), 3);
    }
}
