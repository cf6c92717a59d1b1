//! Token filter implementations for identifier analysis.
//!
//! Filters wrap an upstream [`TokenStream`](crate::analysis::token::TokenStream)
//! and transform it lazily: tokens are pulled one at a time, and a filter only
//! buffers what its algorithm needs.
//!
//! # Available Filters
//!
//! - [`punctuation::PunctuationFilter`] - Drops punctuation tokens
//! - [`identifier::IdentifierFilter`] - Collapses the stream into one identifier
//! - [`identifier_ngram::IdentifierNGramFilter`] - Emits n-grams of identifier pieces
//! - [`composition::CompositionFilter`] - Speculative composition with rollback
//!
//! Each filter has a factory implementing [`Filter`], which is what an
//! analyzer pipeline stores.
//!
//! # Filter Chaining
//!
//! ```text
//! PunctuationTokenizer → IdentifierNGramFilter → (lowercase, folding, ...) → Index
//! ```

pub mod composition;
pub mod identifier;
pub mod identifier_ngram;
pub mod punctuation;

use serde::{Deserialize, Serialize};

use crate::analysis::args::FactoryArgs;
use crate::analysis::token::BoxTokenStream;
use crate::error::Result;

/// Trait for filter factories that wrap token streams.
///
/// A factory holds the filter's configuration and is shared by every stream
/// it wraps, so it must be `Send + Sync`. Each call to
/// [`filter`](Self::filter) creates a fresh stage with its own buffers.
///
/// # Examples
///
/// ```
/// use identigram::analysis::token::{IntoTokenStream, Token, TokenStream};
/// use identigram::analysis::token_filter::Filter;
/// use identigram::analysis::token_filter::punctuation::PunctuationFilterFactory;
///
/// let factory = PunctuationFilterFactory::new();
/// let tokens = vec![
///     Token::with_offsets("22", 0, 0, 2),
///     Token::punctuation("/", 1, 2, 3),
///     Token::with_offsets("2015", 2, 3, 7),
/// ];
/// let mut stream = factory.filter(tokens.into_token_stream()).unwrap();
/// assert_eq!(stream.collect_tokens().unwrap().len(), 2);
/// ```
pub trait Filter: Send + Sync {
    /// Wrap the given stream with this filter.
    fn filter(&self, tokens: BoxTokenStream) -> Result<BoxTokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// The character that stands for "drop all delimiters" in a custom
/// delimiter option.
pub const EMPTY_DELIMITER: char = '\0';

/// What happens to the punctuation between identifier pieces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterPolicy {
    /// Keep the original punctuation verbatim.
    #[default]
    Retain,
    /// Drop punctuation and concatenate the pieces.
    DropAll,
    /// Replace the punctuation with one fixed character between pieces.
    RewriteTo(char),
}

impl DelimiterPolicy {
    /// Map a custom delimiter setting onto a policy.
    ///
    /// `None` retains the original punctuation, [`EMPTY_DELIMITER`] drops it,
    /// and any other character replaces it.
    pub fn from_custom_delimiter(delimiter: Option<char>) -> Self {
        match delimiter {
            None => DelimiterPolicy::Retain,
            Some(EMPTY_DELIMITER) => DelimiterPolicy::DropAll,
            Some(c) => DelimiterPolicy::RewriteTo(c),
        }
    }

    /// Read the policy from the `customDelimiter` factory option.
    pub fn from_args(args: &mut FactoryArgs) -> Result<Self> {
        let custom = args.get_char("customDelimiter")?;
        Ok(Self::from_custom_delimiter(custom))
    }

    /// Check if original punctuation is kept.
    pub fn retains(&self) -> bool {
        matches!(self, DelimiterPolicy::Retain)
    }

    /// The replacement character, if punctuation is rewritten.
    pub fn rewrite_char(&self) -> Option<char> {
        match self {
            DelimiterPolicy::RewriteTo(c) => Some(*c),
            _ => None,
        }
    }
}
