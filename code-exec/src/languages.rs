//! Closed mapping from language name to Judge0 runtime id

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Language name and the runtime id Judge0 uses for it.
///
/// Adding a language is a new row here and nothing else.
pub const LANGUAGES: &[(&str, u32)] = &[
    ("javascript", 63), // Node.js
    ("python", 71),     // Python 3
    ("java", 62),
    ("cpp", 54),
    ("c", 50),
    ("csharp", 51),
    ("php", 68),
    ("ruby", 72),
    ("go", 60),
    ("rust", 73),
    ("kotlin", 78),
    ("swift", 83),
];

/// A language resolved from [`LANGUAGES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    name: &'static str,
    runtime_id: u32,
}

impl Language {
    /// Look up a language by its exact name
    pub fn lookup(name: &str) -> Result<Self, Error> {
        LANGUAGES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(name, runtime_id)| Language { name, runtime_id })
            .ok_or_else(|| Error::Validation(format!("Language '{}' not supported", name)))
    }

    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGES
            .iter()
            .map(|&(name, runtime_id)| Language { name, runtime_id })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn runtime_id(&self) -> u32 {
        self.runtime_id
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::lookup(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_supported_languages_resolve() {
        let expected = [
            ("javascript", 63),
            ("python", 71),
            ("java", 62),
            ("cpp", 54),
            ("c", 50),
            ("csharp", 51),
            ("php", 68),
            ("ruby", 72),
            ("go", 60),
            ("rust", 73),
            ("kotlin", 78),
            ("swift", 83),
        ];

        for (name, id) in expected {
            let language: Language = name.parse().unwrap();
            assert_eq!(language.runtime_id(), id, "runtime id for {}", name);
            assert_eq!(language.name(), name);
            // Stable across lookups
            assert_eq!(Language::lookup(name).unwrap(), language);
        }
    }

    #[test]
    fn test_runtime_ids_are_unique() {
        let ids: HashSet<u32> = Language::all().map(|l| l.runtime_id()).collect();
        assert_eq!(ids.len(), LANGUAGES.len());
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        for name in ["brainfuck", "", "Python", " python", "typescript"] {
            let err = Language::lookup(name).unwrap_err();
            assert!(err.is_validation(), "{} should be rejected", name);
        }

        let err = Language::lookup("brainfuck").unwrap_err();
        assert_eq!(err.to_string(), "Language 'brainfuck' not supported");
    }
}
