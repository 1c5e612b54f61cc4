pub mod language;
pub mod suffixes;

pub use language::LanguageEntry;
pub use suffixes::SuffixAssignment;
