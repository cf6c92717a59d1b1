//! Identifier filter implementation.
//!
//! Collapses a tokenized identifier (alphanumeric pieces interleaved with
//! punctuation) into a single composite token. The punctuation between pieces
//! is kept, dropped or rewritten according to a [`DelimiterPolicy`].
//!
//! ```text
//! "I. ÚS 22/2015"
//!   Retain         → "I.ÚS22/2015"
//!   RewriteTo('.') → "I.ÚS.22.2015"
//!   DropAll        → "IÚS222015"
//! ```
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::token::TokenStream;
//! use identigram::analysis::token_filter::DelimiterPolicy;
//! use identigram::analysis::token_filter::identifier::IdentifierFilter;
//! use identigram::analysis::tokenizer::Tokenizer;
//! use identigram::analysis::tokenizer::punctuation::PunctuationTokenizer;
//!
//! let input = PunctuationTokenizer::new().tokenize("I. ÚS 22/2015").unwrap();
//! let mut filter = IdentifierFilter::new(input, DelimiterPolicy::RewriteTo('.'));
//!
//! let token = filter.next_token().unwrap().unwrap();
//! assert_eq!(token.text, "I.ÚS.22.2015");
//! assert!(filter.next_token().unwrap().is_none());
//! ```

use std::collections::BTreeMap;

use log::trace;

use crate::analysis::args::FactoryArgs;
use crate::analysis::token::{BoxTokenStream, ComposedTerm, Token, TokenStream, TokenType};
use crate::analysis::token_filter::{DelimiterPolicy, Filter};
use crate::error::Result;

/// A stage that emits exactly one token: the whole identifier.
///
/// The first call to `next_token` drains the upstream stream; every later
/// call returns end-of-stream until the filter is reset. An empty upstream
/// still yields one empty token at offsets `[0, 0)`.
pub struct IdentifierFilter {
    input: BoxTokenStream,
    delimiter: DelimiterPolicy,
    composition: ComposedTerm,
    finished: bool,
}

impl IdentifierFilter {
    /// Wrap the given stream.
    pub fn new(input: BoxTokenStream, delimiter: DelimiterPolicy) -> Self {
        IdentifierFilter {
            input,
            delimiter,
            composition: ComposedTerm::new(),
            finished: false,
        }
    }

    /// Get the delimiter policy.
    pub fn delimiter(&self) -> DelimiterPolicy {
        self.delimiter
    }

    fn compose(&mut self, token: &Token) {
        match (token.token_type, self.delimiter) {
            (TokenType::Punctuation, DelimiterPolicy::Retain) => self.composition.append(token),
            (TokenType::Punctuation, _) => {}
            (TokenType::Alphanum, DelimiterPolicy::RewriteTo(c)) => {
                if !self.composition.is_empty() {
                    self.composition.push_char(c);
                }
                self.composition.append(token);
            }
            (TokenType::Alphanum, _) => self.composition.append(token),
        }
    }
}

impl TokenStream for IdentifierFilter {
    fn reset(&mut self) -> Result<()> {
        self.input.reset()?;
        self.composition.clear();
        self.finished = false;
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        if self.finished {
            return Ok(None);
        }

        while let Some(token) = self.input.next_token()? {
            self.compose(&token);
        }

        let token = self.composition.to_token();
        trace!(
            "identifier composed '{}' [{}, {})",
            token.text, token.start_offset, token.end_offset
        );
        self.composition.clear();
        self.finished = true;
        Ok(Some(token))
    }

    fn close(&mut self) -> Result<()> {
        self.composition.clear();
        self.finished = true;
        self.input.close()
    }
}

/// Factory for [`IdentifierFilter`].
///
/// Options: `customDelimiter` (single character; empty drops punctuation).
#[derive(Clone, Debug, Default)]
pub struct IdentifierFilterFactory {
    delimiter: DelimiterPolicy,
}

impl IdentifierFilterFactory {
    /// Create a factory with the given delimiter policy.
    pub fn new(delimiter: DelimiterPolicy) -> Self {
        IdentifierFilterFactory { delimiter }
    }

    /// Create a factory from an option map.
    pub fn from_args(args: BTreeMap<String, String>) -> Result<Self> {
        let mut args = FactoryArgs::new(args);
        let delimiter = DelimiterPolicy::from_args(&mut args)?;
        args.finish()?;
        Ok(Self::new(delimiter))
    }

    /// Get the delimiter policy.
    pub fn delimiter(&self) -> DelimiterPolicy {
        self.delimiter
    }

    /// Wrap the given stream.
    pub fn create(&self, input: BoxTokenStream) -> IdentifierFilter {
        IdentifierFilter::new(input, self.delimiter)
    }
}

impl Filter for IdentifierFilterFactory {
    fn filter(&self, tokens: BoxTokenStream) -> Result<BoxTokenStream> {
        Ok(Box::new(self.create(tokens)))
    }

    fn name(&self) -> &'static str {
        "identifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::IntoTokenStream;
    use crate::analysis::tokenizer::Tokenizer;
    use crate::analysis::tokenizer::punctuation::PunctuationTokenizer;

    fn analyze(text: &str, delimiter: DelimiterPolicy) -> Vec<Token> {
        let input = PunctuationTokenizer::new().tokenize(text).unwrap();
        IdentifierFilter::new(input, delimiter)
            .collect_tokens()
            .unwrap()
    }

    #[test]
    fn test_retain_delimiters() {
        let tokens = analyze("I. ÚS 22/2015", DelimiterPolicy::Retain);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "I.ÚS22/2015");
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 13);
        assert_eq!(tokens[0].token_type, TokenType::Alphanum);
    }

    #[test]
    fn test_rewrite_delimiters() {
        let tokens = analyze("I. ÚS 22/2015", DelimiterPolicy::RewriteTo('.'));
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "I.ÚS.22.2015");
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 13));
    }

    #[test]
    fn test_drop_delimiters() {
        let tokens = analyze("I. ÚS 22/2015", DelimiterPolicy::DropAll);
        assert_eq!(tokens[0].text, "IÚS222015");
    }

    #[test]
    fn test_rewrite_ignores_leading_and_trailing_punctuation() {
        let tokens = analyze("(22/2015).", DelimiterPolicy::RewriteTo('-'));
        assert_eq!(tokens[0].text, "22-2015");
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (1, 8));

        let tokens = analyze("(22/2015).", DelimiterPolicy::Retain);
        assert_eq!(tokens[0].text, "(22/2015).");
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 10));
    }

    #[test]
    fn test_empty_stream_yields_empty_token() {
        let mut filter =
            IdentifierFilter::new(Vec::new().into_token_stream(), DelimiterPolicy::Retain);
        let token = filter.next_token().unwrap().unwrap();
        assert_eq!(token.text, "");
        assert_eq!((token.start_offset, token.end_offset), (0, 0));
        assert!(filter.next_token().unwrap().is_none());
    }

    #[test]
    fn test_close_ends_stream() {
        let input = PunctuationTokenizer::new().tokenize("ECLI:SK:1").unwrap();
        let mut filter = IdentifierFilter::new(input, DelimiterPolicy::Retain);
        filter.close().unwrap();
        assert!(filter.next_token().unwrap().is_none());

        filter.close().unwrap();
        assert!(filter.next_token().unwrap().is_none());

        let mut filter =
            IdentifierFilter::new(Vec::new().into_token_stream(), DelimiterPolicy::Retain);
        filter.close().unwrap();
        assert!(filter.next_token().unwrap().is_none());
    }

    #[test]
    fn test_reset_replays() {
        let input = PunctuationTokenizer::new().tokenize("ECLI:SK:1").unwrap();
        let mut filter = IdentifierFilter::new(input, DelimiterPolicy::Retain);
        let first = filter.collect_tokens().unwrap();

        filter.reset().unwrap();
        let second = filter.collect_tokens().unwrap();

        assert_eq!(first, second);
        assert_eq!(second[0].text, "ECLI:SK:1");
    }

    #[test]
    fn test_factory_from_args() {
        let mut args = BTreeMap::new();
        args.insert("customDelimiter".to_string(), "/".to_string());
        let factory = IdentifierFilterFactory::from_args(args).unwrap();
        assert_eq!(factory.delimiter(), DelimiterPolicy::RewriteTo('/'));

        let mut args = BTreeMap::new();
        args.insert("delimiter".to_string(), "/".to_string());
        let err = IdentifierFilterFactory::from_args(args).unwrap_err();
        assert!(err.to_string().contains("Unknown parameters"));
        assert!(err.to_string().contains("delimiter"));
    }

    #[test]
    fn test_factory_rejects_ignore_delimiter() {
        let mut args = BTreeMap::new();
        args.insert("ignoreDelimiter".to_string(), "true".to_string());
        let err = IdentifierFilterFactory::from_args(args).unwrap_err();
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Unknown parameters: {ignoreDelimiter=true}"
        );

        let mut args = BTreeMap::new();
        args.insert("customDelimiter".to_string(), String::new());
        let factory = IdentifierFilterFactory::from_args(args).unwrap();
        assert_eq!(factory.delimiter(), DelimiterPolicy::DropAll);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(IdentifierFilterFactory::default().name(), "identifier");
    }
}
