//! Punctuation-aware tokenizer for identifier-like text.
//!
//! Splits input into maximal runs of letters, digits and combining marks
//! ([`TokenType::Alphanum`]) and single punctuation characters
//! ([`TokenType::Punctuation`]). Whitespace separates tokens but never
//! produces one.
//!
//! ```text
//! "I. ÚS 22/2015"  →  I  .  ÚS  22  /  2015
//! ```
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::token::{TokenStream, TokenType};
//! use identigram::analysis::tokenizer::Tokenizer;
//! use identigram::analysis::tokenizer::punctuation::PunctuationTokenizer;
//!
//! let tokenizer = PunctuationTokenizer::new();
//! let tokens = tokenizer.tokenize("192.168.1").unwrap().collect_tokens().unwrap();
//!
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["192", ".", "168", ".", "1"]);
//! assert_eq!(tokens[1].token_type, TokenType::Punctuation);
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::args::FactoryArgs;
use crate::analysis::token::{BoxTokenStream, Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{IdentigramError, Result};

/// Default maximum length of an alphanumeric run, in characters.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 255;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<piece>[\p{L}\p{N}\p{M}]+)|(?P<punct>[^\s\p{L}\p{N}\p{M}])")
        .expect("token pattern should be valid")
});

/// A tokenizer producing alphanumeric pieces and punctuation tokens.
///
/// Pieces longer than the maximum token length are dropped; the positions
/// they would have taken are added to the next token's position increment.
#[derive(Clone, Debug)]
pub struct PunctuationTokenizer {
    max_token_length: usize,
}

impl PunctuationTokenizer {
    /// Create a new tokenizer with the default maximum token length.
    pub fn new() -> Self {
        PunctuationTokenizer {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }

    /// Create a tokenizer from a factory option map.
    ///
    /// The tokenizer accepts no options; any key is reported as unknown.
    pub fn from_args(args: BTreeMap<String, String>) -> Result<Self> {
        FactoryArgs::new(args).finish()?;
        Ok(Self::new())
    }

    /// Set the maximum length (in characters) of an alphanumeric piece.
    pub fn with_max_token_length(mut self, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(IdentigramError::config(
                "maxTokenLength must be greater than zero",
            ));
        }
        self.max_token_length = length;
        Ok(self)
    }

    /// Get the maximum token length.
    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }
}

impl Default for PunctuationTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for PunctuationTokenizer {
    fn tokenize(&self, text: &str) -> Result<BoxTokenStream> {
        Ok(Box::new(PunctuationTokenStream::new(
            text,
            self.max_token_length,
        )))
    }

    fn name(&self) -> &'static str {
        "punctation"
    }
}

/// The token stream produced by [`PunctuationTokenizer`].
///
/// Keeps its own copy of the input so it can be rewound by `reset`.
/// Matching runs on byte indices while token offsets are counted in UTF-16
/// code units, so `unit_cursor` tracks the unit offset of `cursor`.
#[derive(Clone, Debug)]
pub struct PunctuationTokenStream {
    text: String,
    cursor: usize,
    unit_cursor: usize,
    next_position: usize,
    max_token_length: usize,
}

impl PunctuationTokenStream {
    fn new(text: &str, max_token_length: usize) -> Self {
        PunctuationTokenStream {
            text: text.to_owned(),
            cursor: 0,
            unit_cursor: 0,
            next_position: 0,
            max_token_length,
        }
    }
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

impl TokenStream for PunctuationTokenStream {
    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        self.unit_cursor = 0;
        self.next_position = 0;
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let mut skipped = 0;

        while let Some(caps) = TOKEN_PATTERN.captures_at(&self.text, self.cursor) {
            let (mat, token_type) = match (caps.name("piece"), caps.name("punct")) {
                (Some(piece), _) => (piece, TokenType::Alphanum),
                (None, Some(punct)) => (punct, TokenType::Punctuation),
                (None, None) => break,
            };
            let start = self.unit_cursor + utf16_len(&self.text[self.cursor..mat.start()]);
            let end = start + utf16_len(mat.as_str());
            self.cursor = mat.end();
            self.unit_cursor = end;

            if token_type == TokenType::Alphanum
                && mat.as_str().chars().count() > self.max_token_length
            {
                skipped += 1;
                continue;
            }

            let position = self.next_position + skipped;
            self.next_position = position + 1;

            let token = Token::with_offsets(mat.as_str(), position, start, end)
                .with_token_type(token_type)
                .with_position_increment(skipped + 1);
            return Ok(Some(token));
        }

        self.unit_cursor += utf16_len(&self.text[self.cursor..]);
        self.cursor = self.text.len();
        Ok(None)
    }

    fn close(&mut self) -> Result<()> {
        self.text.clear();
        self.cursor = 0;
        self.unit_cursor = 0;
        self.next_position = 0;
        Ok(())
    }
}
