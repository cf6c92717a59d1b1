//! Identifier n-gram filter implementation.
//!
//! Emits n-grams of identifier *pieces* rather than characters: every
//! contiguous run of `k` alphanumeric pieces, `min_gram_size <= k <=
//! max_gram_size`, becomes one token that keeps (or rewrites) the punctuation
//! found between those pieces.
//!
//! N-grams come out grouped by their first piece, shortest first, and carry
//! offsets into the original text so they can be used for highlighting:
//!
//! ```text
//! "192.168.1" (min=1, max=3)
//!   192        [0, 3)
//!   192.168    [0, 7)
//!   192.168.1  [0, 9)
//!   168        [4, 7)
//!   168.1      [4, 9)
//!   1          [8, 9)
//! ```
//!
//! With `include_identifier` set, the whole identifier is emitted once more at
//! the end of the stream when its piece count lies outside
//! `[min_gram_size, max_gram_size]`, so it stays searchable as a whole.
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::token::TokenStream;
//! use identigram::analysis::token_filter::identifier_ngram::{
//!     IdentifierNGramConfig, IdentifierNGramFilter,
//! };
//! use identigram::analysis::tokenizer::Tokenizer;
//! use identigram::analysis::tokenizer::punctuation::PunctuationTokenizer;
//!
//! let input = PunctuationTokenizer::new().tokenize("I. ÚS 22/2015").unwrap();
//! let config = IdentifierNGramConfig::new(3, 3);
//! let mut filter = IdentifierNGramFilter::new(input, config).unwrap();
//!
//! let texts: Vec<_> = filter
//!     .collect_tokens()
//!     .unwrap()
//!     .into_iter()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(texts, vec!["I.ÚS22", "ÚS22/2015"]);
//! ```

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::analysis::args::FactoryArgs;
use crate::analysis::token::{BoxTokenStream, ComposedTerm, Token, TokenStream, TokenType};
use crate::analysis::token_filter::{DelimiterPolicy, Filter};
use crate::error::{IdentigramError, Result};

/// Default minimum number of pieces in an n-gram.
pub const DEFAULT_MIN_NGRAM_SIZE: usize = 3;

/// Default maximum number of pieces in an n-gram.
pub const DEFAULT_MAX_NGRAM_SIZE: usize = 8;

/// Default for emitting the whole identifier when it falls outside the gram range.
pub const DEFAULT_INCLUDE_IDENTIFIER: bool = false;

/// Configuration of an [`IdentifierNGramFilter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentifierNGramConfig {
    /// Minimum number of pieces per n-gram (>= 1)
    pub min_gram_size: usize,
    /// Maximum number of pieces per n-gram (>= min_gram_size)
    pub max_gram_size: usize,
    /// Emit the whole identifier when its piece count is outside the range
    pub include_identifier: bool,
    /// Treatment of the punctuation between pieces
    pub delimiter: DelimiterPolicy,
}

impl IdentifierNGramConfig {
    /// Create a configuration with the given gram range and default options.
    pub fn new(min_gram_size: usize, max_gram_size: usize) -> Self {
        IdentifierNGramConfig {
            min_gram_size,
            max_gram_size,
            ..Default::default()
        }
    }

    /// Set whether the whole identifier is emitted as an edge token.
    pub fn include_identifier(mut self, include: bool) -> Self {
        self.include_identifier = include;
        self
    }

    /// Set the delimiter policy.
    pub fn delimiter(mut self, delimiter: DelimiterPolicy) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Check the gram range.
    pub fn validate(&self) -> Result<()> {
        if self.min_gram_size < 1 {
            return Err(IdentigramError::config(
                "minGramSize must be at least 1".to_string(),
            ));
        }
        if self.max_gram_size < self.min_gram_size {
            return Err(IdentigramError::config(format!(
                "maxGramSize ({}) must be >= minGramSize ({})",
                self.max_gram_size, self.min_gram_size
            )));
        }
        Ok(())
    }
}

impl Default for IdentifierNGramConfig {
    fn default() -> Self {
        IdentifierNGramConfig {
            min_gram_size: DEFAULT_MIN_NGRAM_SIZE,
            max_gram_size: DEFAULT_MAX_NGRAM_SIZE,
            include_identifier: DEFAULT_INCLUDE_IDENTIFIER,
            delimiter: DelimiterPolicy::Retain,
        }
    }
}

/// One buffered piece and the punctuation that followed it.
#[derive(Clone, Debug)]
struct Item {
    piece: Token,
    delimiters: Vec<Token>,
}

impl Item {
    fn new(piece: Token) -> Self {
        Item {
            piece,
            delimiters: Vec::new(),
        }
    }
}

/// A stage emitting n-grams of identifier pieces.
///
/// At most `max_gram_size` pieces are buffered. Once the buffer is full (or
/// the upstream ends) all n-grams starting at the first buffered piece are
/// queued, the first piece slides out, and the queue is drained before more
/// input is read.
pub struct IdentifierNGramFilter {
    input: BoxTokenStream,
    config: IdentifierNGramConfig,
    items: VecDeque<Item>,
    queue: VecDeque<Token>,
    full_composite: ComposedTerm,
    term_count: usize,
    last_position: Option<usize>,
    exhausted: bool,
    edge_emitted: bool,
}

impl IdentifierNGramFilter {
    /// Wrap the given stream. Fails if the gram range is invalid.
    pub fn new(input: BoxTokenStream, config: IdentifierNGramConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(input, config))
    }

    fn with_valid_config(input: BoxTokenStream, config: IdentifierNGramConfig) -> Self {
        IdentifierNGramFilter {
            input,
            config,
            items: VecDeque::with_capacity(config.max_gram_size),
            queue: VecDeque::new(),
            full_composite: ComposedTerm::new(),
            term_count: 0,
            last_position: None,
            exhausted: false,
            edge_emitted: false,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &IdentifierNGramConfig {
        &self.config
    }

    /// Pull upstream until the window holds `max_gram_size` pieces or the
    /// stream ends.
    fn fill(&mut self) -> Result<()> {
        while !self.exhausted && self.items.len() < self.config.max_gram_size {
            match self.input.next_token()? {
                Some(token) => self.consume(token),
                None => self.exhausted = true,
            }
        }
        Ok(())
    }

    fn consume(&mut self, token: Token) {
        match token.token_type {
            TokenType::Alphanum => {
                if let Some(c) = self.config.delimiter.rewrite_char() {
                    if self.term_count > 0 {
                        self.full_composite.push_char(c);
                    }
                }
                self.term_count += 1;
                self.full_composite.append(&token);
                self.items.push_back(Item::new(token));
            }
            TokenType::Punctuation => {
                if self.config.delimiter.retains() {
                    self.full_composite.append(&token);
                    if let Some(last) = self.items.back_mut() {
                        last.delimiters.push(token);
                    }
                }
            }
        }
    }

    /// Queue every n-gram anchored at the first buffered piece, shortest first.
    fn enqueue_ngrams(&mut self) {
        let longest = self.items.len().min(self.config.max_gram_size);

        for size in self.config.min_gram_size..=longest {
            let mut gram = ComposedTerm::new();
            for (i, item) in self.items.iter().take(size).enumerate() {
                gram.append(&item.piece);
                if i + 1 == size {
                    break;
                }
                match self.config.delimiter {
                    DelimiterPolicy::Retain => {
                        for delimiter in &item.delimiters {
                            gram.append(delimiter);
                        }
                    }
                    DelimiterPolicy::RewriteTo(c) => gram.push_char(c),
                    DelimiterPolicy::DropAll => {}
                }
            }

            let mut token = gram.to_token();
            token.position_increment = self.increment_to(token.position);
            self.last_position = Some(token.position);
            trace!(
                "n-gram '{}' [{}, {})",
                token.text, token.start_offset, token.end_offset
            );
            self.queue.push_back(token);
        }
    }

    fn increment_to(&self, position: usize) -> usize {
        match self.last_position {
            None => position + 1,
            Some(last) => position.saturating_sub(last),
        }
    }

    /// The whole identifier, once, when its piece count is outside the range.
    fn take_edge(&mut self) -> Option<Token> {
        let in_range = (self.config.min_gram_size..=self.config.max_gram_size)
            .contains(&self.term_count);
        if !self.config.include_identifier || self.edge_emitted || self.term_count == 0 || in_range
        {
            return None;
        }

        self.edge_emitted = true;
        let mut token = self.full_composite.to_token();
        token.position_increment = self.increment_to(token.position);
        debug!(
            "emitting whole identifier '{}' ({} pieces outside {}..={})",
            token.text, self.term_count, self.config.min_gram_size, self.config.max_gram_size
        );
        Some(token)
    }

    fn clear(&mut self) {
        self.items.clear();
        self.queue.clear();
        self.full_composite.clear();
        self.term_count = 0;
        self.last_position = None;
        self.exhausted = false;
        self.edge_emitted = false;
    }
}

impl TokenStream for IdentifierNGramFilter {
    fn reset(&mut self) -> Result<()> {
        self.input.reset()?;
        self.clear();
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(token) = self.queue.pop_front() {
            return Ok(Some(token));
        }

        self.fill()?;

        // While upstream has input the window is full, so this only fails
        // once the stream is exhausted and too few pieces remain.
        if self.items.len() >= self.config.min_gram_size {
            self.enqueue_ngrams();
            self.items.pop_front();
            return Ok(self.queue.pop_front());
        }

        self.items.clear();
        Ok(self.take_edge())
    }

    fn close(&mut self) -> Result<()> {
        self.clear();
        self.input.close()
    }
}

/// Factory for [`IdentifierNGramFilter`].
///
/// Options: `minGramSize` (default 3), `maxGramSize` (default 8),
/// `includeIdentifier` (default false), `customDelimiter`.
#[derive(Clone, Debug, Default)]
pub struct IdentifierNGramFilterFactory {
    config: IdentifierNGramConfig,
}

impl IdentifierNGramFilterFactory {
    /// Create a factory from a configuration. Fails if the gram range is invalid.
    pub fn new(config: IdentifierNGramConfig) -> Result<Self> {
        config.validate()?;
        Ok(IdentifierNGramFilterFactory { config })
    }

    /// Create a factory from an option map.
    pub fn from_args(args: BTreeMap<String, String>) -> Result<Self> {
        let mut args = FactoryArgs::new(args);
        let config = IdentifierNGramConfig {
            min_gram_size: args.get_usize("minGramSize", DEFAULT_MIN_NGRAM_SIZE)?,
            max_gram_size: args.get_usize("maxGramSize", DEFAULT_MAX_NGRAM_SIZE)?,
            include_identifier: args.get_bool("includeIdentifier", DEFAULT_INCLUDE_IDENTIFIER)?,
            delimiter: DelimiterPolicy::from_args(&mut args)?,
        };
        args.finish()?;
        debug!("identifier n-gram filter configured: {config:?}");
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &IdentifierNGramConfig {
        &self.config
    }

    /// Wrap the given stream.
    pub fn create(&self, input: BoxTokenStream) -> IdentifierNGramFilter {
        IdentifierNGramFilter::with_valid_config(input, self.config)
    }
}

impl Filter for IdentifierNGramFilterFactory {
    fn filter(&self, tokens: BoxTokenStream) -> Result<BoxTokenStream> {
        Ok(Box::new(self.create(tokens)))
    }

    fn name(&self) -> &'static str {
        "identifierNGram"
    }
}
