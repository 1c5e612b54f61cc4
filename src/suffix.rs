//! URL path suffix assignment: display defaults, validation and persistence.
//!
//! Rules applied to each language, first failure wins:
//! - blank only for the selected fallback language
//! - no `/` (the suffix is a single path segment)
//! - unique among all non-blank suffixes
//! - at most [`SUFFIX_MAX_LENGTH`] characters

use std::collections::HashMap;
use thiserror::Error;

use crate::config::{SUFFIX_MAX_LENGTH, URL_SUFFIXES_KEY};
use crate::db::LogOnError;
use crate::domain::{LanguageEntry, SuffixAssignment};

// ============================================================================
// Collaborators
// ============================================================================

/// Read-only, ordered list of configured languages
pub trait LanguageRegistry {
  fn languages(&self) -> &[LanguageEntry];
}

impl LanguageRegistry for [LanguageEntry] {
  fn languages(&self) -> &[LanguageEntry] {
    self
  }
}

impl LanguageRegistry for Vec<LanguageEntry> {
  fn languages(&self) -> &[LanguageEntry] {
    self
  }
}

/// Key/value store holding suffix mappings
pub trait ConfigStore {
  fn get_mapping(&self, key: &str) -> Result<Option<SuffixAssignment>, PersistError>;

  /// Replace the value under `key` in a single write
  fn set_mapping(&self, key: &str, value: &SuffixAssignment) -> Result<(), PersistError>;
}

/// Failure to read or write the configuration store
#[derive(Debug, Error)]
pub enum PersistError {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("stored value is not a valid suffix mapping: {0}")]
  Encoding(#[from] serde_json::Error),

  #[error("configuration store unavailable")]
  Unavailable,
}

// ============================================================================
// Validation result types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixErrorKind {
  BlankSuffixNotAllowed,
  SuffixContainsSlash,
  DuplicateSuffix,
  SuffixTooLong,
}

impl SuffixErrorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::BlankSuffixNotAllowed => "blank_suffix_not_allowed",
      Self::SuffixContainsSlash => "suffix_contains_slash",
      Self::DuplicateSuffix => "duplicate_suffix",
      Self::SuffixTooLong => "suffix_too_long",
    }
  }
}

/// A rejected suffix for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixViolation {
  pub langcode: String,
  pub kind: SuffixErrorKind,
  pub message: String,
}

impl SuffixViolation {
  fn new(language: &LanguageEntry, value: &str, kind: SuffixErrorKind) -> Self {
    let message = match kind {
      SuffixErrorKind::BlankSuffixNotAllowed => {
        "The suffix may only be left blank for the selected detection fallback language.".to_string()
      }
      SuffixErrorKind::SuffixContainsSlash => "The suffix may not contain a slash.".to_string(),
      SuffixErrorKind::DuplicateSuffix => {
        format!("The suffix for {}, {}, is not unique.", language.name, value)
      }
      SuffixErrorKind::SuffixTooLong => format!(
        "{} path suffix cannot be longer than {} characters but is currently {} characters long.",
        language.name,
        SUFFIX_MAX_LENGTH,
        value.chars().count()
      ),
    };
    Self {
      langcode: language.code.clone(),
      kind,
      message,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
  Valid,
  /// One entry per offending language, in registry order
  Invalid(Vec<SuffixViolation>),
}

impl ValidationResult {
  pub fn is_valid(&self) -> bool {
    matches!(self, Self::Valid)
  }

  pub fn violations(&self) -> &[SuffixViolation] {
    match self {
      Self::Valid => &[],
      Self::Invalid(violations) => violations,
    }
  }

  /// Violation reported for a language, if any
  pub fn for_language(&self, langcode: &str) -> Option<&SuffixViolation> {
    self.violations().iter().find(|v| v.langcode == langcode)
  }
}

// ============================================================================
// Manager
// ============================================================================

/// Validates and persists the suffix mapping for the configured languages.
///
/// Holds no state of its own; every call reads from `registry` and `store`.
pub struct SuffixConfigManager<'a, R: ?Sized, S: ?Sized> {
  registry: &'a R,
  store: &'a S,
}

impl<'a, R, S> SuffixConfigManager<'a, R, S>
where
  R: LanguageRegistry + ?Sized,
  S: ConfigStore + ?Sized,
{
  pub fn new(registry: &'a R, store: &'a S) -> Self {
    Self { registry, store }
  }

  /// Suffix for every language: stored value, else the first two code characters
  pub fn get_defaults(&self) -> SuffixAssignment {
    let stored = self
      .store
      .get_mapping(URL_SUFFIXES_KEY)
      .log_warn_default("Failed to read stored URL suffixes")
      .unwrap_or_default();

    self
      .registry
      .languages()
      .iter()
      .map(|language| {
        let suffix = stored
          .get(&language.code)
          .map(str::to_string)
          .unwrap_or_else(|| language.default_suffix());
        (language.code.clone(), suffix)
      })
      .collect()
  }

  /// Check a candidate mapping against every registry language.
  ///
  /// Languages missing from `candidate` are checked as blank.
  pub fn validate(&self, candidate: &SuffixAssignment, fallback_langcode: &str) -> ValidationResult {
    let counts = candidate.value_counts();

    let violations: Vec<SuffixViolation> = self
      .registry
      .languages()
      .iter()
      .filter_map(|language| {
        let value = candidate.get(&language.code).unwrap_or("");
        let is_fallback = language.code == fallback_langcode;
        check_suffix(value, is_fallback, &counts)
          .map(|kind| SuffixViolation::new(language, value, kind))
      })
      .collect();

    if violations.is_empty() {
      ValidationResult::Valid
    } else {
      ValidationResult::Invalid(violations)
    }
  }

  /// Write `candidate` verbatim, replacing the stored mapping
  pub fn save(&self, candidate: &SuffixAssignment) -> Result<(), PersistError> {
    self.store.set_mapping(URL_SUFFIXES_KEY, candidate)?;
    tracing::info!("Saved URL suffixes for {} languages", candidate.len());
    Ok(())
  }
}

fn check_suffix(
  value: &str,
  is_fallback: bool,
  counts: &HashMap<&str, usize>,
) -> Option<SuffixErrorKind> {
  if value.is_empty() {
    return (!is_fallback).then_some(SuffixErrorKind::BlankSuffixNotAllowed);
  }
  if value.contains('/') {
    return Some(SuffixErrorKind::SuffixContainsSlash);
  }
  if counts.get(value).copied().unwrap_or(0) > 1 {
    return Some(SuffixErrorKind::DuplicateSuffix);
  }
  if value.chars().count() > SUFFIX_MAX_LENGTH {
    return Some(SuffixErrorKind::SuffixTooLong);
  }
  None
}
