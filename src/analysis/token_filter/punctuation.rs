//! Punctuation filter implementation.
//!
//! Removes every [`TokenType::Punctuation`] token from the stream and passes
//! everything else through unchanged. The position increments of removed
//! tokens are carried over to the next kept token, so phrase positions still
//! line up with the original text.

use std::collections::BTreeMap;

use crate::analysis::args::FactoryArgs;
use crate::analysis::token::{BoxTokenStream, Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A stage that drops punctuation tokens.
pub struct PunctuationFilter {
    input: BoxTokenStream,
}

impl PunctuationFilter {
    /// Wrap the given stream.
    pub fn new(input: BoxTokenStream) -> Self {
        PunctuationFilter { input }
    }
}

impl TokenStream for PunctuationFilter {
    fn reset(&mut self) -> Result<()> {
        self.input.reset()
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let mut skipped = 0;
        while let Some(mut token) = self.input.next_token()? {
            if token.token_type == TokenType::Punctuation {
                skipped += token.position_increment;
                continue;
            }
            token.position_increment += skipped;
            return Ok(Some(token));
        }
        Ok(None)
    }

    fn close(&mut self) -> Result<()> {
        self.input.close()
    }
}

/// Factory for [`PunctuationFilter`]. Accepts no options.
#[derive(Clone, Debug, Default)]
pub struct PunctuationFilterFactory;

impl PunctuationFilterFactory {
    /// Create a new factory.
    pub fn new() -> Self {
        PunctuationFilterFactory
    }

    /// Create a factory from an option map; any key is reported as unknown.
    pub fn from_args(args: BTreeMap<String, String>) -> Result<Self> {
        FactoryArgs::new(args).finish()?;
        Ok(Self::new())
    }

    /// Wrap the given stream.
    pub fn create(&self, input: BoxTokenStream) -> PunctuationFilter {
        PunctuationFilter::new(input)
    }
}

impl Filter for PunctuationFilterFactory {
    fn filter(&self, tokens: BoxTokenStream) -> Result<BoxTokenStream> {
        Ok(Box::new(self.create(tokens)))
    }

    fn name(&self) -> &'static str {
        "punctation"
    }
}
