//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first stage of the analysis pipeline. They split raw
//! input into the alphanumeric pieces and punctuation tokens that identifier
//! filters consume.
//!
//! # Available Tokenizers
//!
//! - [`punctuation::PunctuationTokenizer`] - Alphanumeric runs and single punctuation characters
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::token::TokenStream;
//! use identigram::analysis::tokenizer::Tokenizer;
//! use identigram::analysis::tokenizer::punctuation::PunctuationTokenizer;
//!
//! let tokenizer = PunctuationTokenizer::new();
//! let tokens = tokenizer.tokenize("22/2015").unwrap().collect_tokens().unwrap();
//! assert_eq!(tokens.len(), 3);
//! ```

pub mod punctuation;

use crate::analysis::token::BoxTokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into token streams.
///
/// The trait requires `Send + Sync` so one tokenizer can be shared between
/// analyzers; each call to [`tokenize`](Self::tokenize) returns an
/// independent stream.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<BoxTokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
