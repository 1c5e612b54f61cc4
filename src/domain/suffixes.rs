use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Language code -> URL path suffix mapping.
///
/// Stored as a plain JSON object under the `url_suffixes` settings key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuffixAssignment(BTreeMap<String, String>);

impl SuffixAssignment {
  pub fn get(&self, langcode: &str) -> Option<&str> {
    self.0.get(langcode).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// How many languages use each suffix value
  pub fn value_counts(&self) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for value in self.0.values() {
      *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    counts
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SuffixAssignment {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}
