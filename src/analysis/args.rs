//! String-keyed option maps for component factories.
//!
//! Factories consume the options they understand one key at a time; whatever
//! remains when [`FactoryArgs::finish`] is called is reported as unknown.
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::args::FactoryArgs;
//!
//! let mut args = FactoryArgs::from_pairs([("minGramSize", "2"), ("foo", "bar")]);
//! assert_eq!(args.get_usize("minGramSize", 3).unwrap(), 2);
//! assert_eq!(args.get_usize("maxGramSize", 8).unwrap(), 8);
//!
//! let err = args.finish().unwrap_err();
//! assert!(err.to_string().contains("foo"));
//! ```

use std::collections::BTreeMap;

use crate::error::{IdentigramError, Result};

/// Option map handed to a component factory.
#[derive(Clone, Debug, Default)]
pub struct FactoryArgs {
    args: BTreeMap<String, String>,
}

impl FactoryArgs {
    /// Wrap an option map.
    pub fn new(args: BTreeMap<String, String>) -> Self {
        FactoryArgs { args }
    }

    /// Build an option map from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        FactoryArgs {
            args: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Take a raw option value.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.args.remove(key)
    }

    /// Take an unsigned integer option, falling back to `default` when absent.
    pub fn get_usize(&mut self, key: &str, default: usize) -> Result<usize> {
        match self.take(key) {
            None => Ok(default),
            Some(value) => value.trim().parse().map_err(|_| {
                IdentigramError::config(format!(
                    "{key} must be a non-negative integer, got '{value}'"
                ))
            }),
        }
    }

    /// Take a boolean option, falling back to `default` when absent.
    pub fn get_bool(&mut self, key: &str, default: bool) -> Result<bool> {
        match self.take(key) {
            None => Ok(default),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(IdentigramError::config(format!(
                    "{key} must be 'true' or 'false', got '{value}'"
                ))),
            },
        }
    }

    /// Take an optional single-character option.
    ///
    /// Returns `Some('\0')` for an empty value, which callers treat as
    /// "no character".
    pub fn get_char(&mut self, key: &str) -> Result<Option<char>> {
        let Some(value) = self.take(key) else {
            return Ok(None);
        };
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Some('\0')),
            (Some(c), None) => Ok(Some(c)),
            _ => Err(IdentigramError::config(format!(
                "{key} must be a single character, got '{value}'"
            ))),
        }
    }

    /// Check if no options remain.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Fail if any option was not consumed.
    pub fn finish(self) -> Result<()> {
        if self.args.is_empty() {
            return Ok(());
        }
        let unknown: Vec<String> = self
            .args
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        Err(IdentigramError::config(format!(
            "Unknown parameters: {{{}}}",
            unknown.join(", ")
        )))
    }
}

impl From<BTreeMap<String, String>> for FactoryArgs {
    fn from(args: BTreeMap<String, String>) -> Self {
        FactoryArgs::new(args)
    }
}
