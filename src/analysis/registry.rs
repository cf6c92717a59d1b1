//! Name-based lookup of tokenizers and filters.
//!
//! Components are registered under the names used in analyzer configuration.
//! The misspelled `punctation` names are the canonical ones; `punctuation`
//! is accepted as an alias.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::identifier::IdentifierFilterFactory;
use crate::analysis::token_filter::identifier_ngram::IdentifierNGramFilterFactory;
use crate::analysis::token_filter::punctuation::PunctuationFilterFactory;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::punctuation::PunctuationTokenizer;
use crate::error::{IdentigramError, Result};

/// Registered tokenizer names.
pub const TOKENIZER_NAMES: &[&str] = &["punctation", "punctuation", "identifier"];

/// Registered filter names.
pub const FILTER_NAMES: &[&str] = &["identifier", "identifierNGram", "punctation", "punctuation"];

/// Create a tokenizer by name from its option map.
pub fn tokenizer_from_name(
    name: &str,
    args: BTreeMap<String, String>,
) -> Result<Arc<dyn Tokenizer>> {
    debug!("creating tokenizer '{name}' with {args:?}");
    match name {
        "punctation" | "punctuation" | "identifier" => {
            Ok(Arc::new(PunctuationTokenizer::from_args(args)?))
        }
        _ => Err(IdentigramError::config(format!(
            "Unknown tokenizer '{name}', expected one of {TOKENIZER_NAMES:?}"
        ))),
    }
}

/// Create a filter factory by name from its option map.
pub fn filter_from_name(name: &str, args: BTreeMap<String, String>) -> Result<Arc<dyn Filter>> {
    debug!("creating filter '{name}' with {args:?}");
    match name {
        "identifier" => Ok(Arc::new(IdentifierFilterFactory::from_args(args)?)),
        "identifierNGram" => Ok(Arc::new(IdentifierNGramFilterFactory::from_args(args)?)),
        "punctation" | "punctuation" => Ok(Arc::new(PunctuationFilterFactory::from_args(args)?)),
        _ => Err(IdentigramError::config(format!(
            "Unknown filter '{name}', expected one of {FILTER_NAMES:?}"
        ))),
    }
}
