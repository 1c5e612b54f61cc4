use serde::{Deserialize, Serialize};

/// A configured site language, as listed by the language registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
  pub code: String,
  pub name: String,
  pub is_default: bool,
}

impl LanguageEntry {
  pub fn new(code: &str, name: &str, is_default: bool) -> Self {
    Self {
      code: code.to_string(),
      name: name.to_string(),
      is_default,
    }
  }

  /// Suffix offered when none is stored: the first two characters of the code
  pub fn default_suffix(&self) -> String {
    self.code.chars().take(2).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_suffix_truncates_code() {
    assert_eq!(LanguageEntry::new("en", "English", true).default_suffix(), "en");
    assert_eq!(LanguageEntry::new("pt-br", "Portuguese", false).default_suffix(), "pt");
    assert_eq!(LanguageEntry::new("zh-hans", "Chinese", false).default_suffix(), "zh");
  }

  #[test]
  fn test_default_suffix_short_code() {
    assert_eq!(LanguageEntry::new("x", "Single", false).default_suffix(), "x");
    assert_eq!(LanguageEntry::new("", "Empty", false).default_suffix(), "");
  }

  #[test]
  fn test_default_suffix_respects_char_boundaries() {
    assert_eq!(LanguageEntry::new("ñañ", "Test", false).default_suffix(), "ña");
  }
}
