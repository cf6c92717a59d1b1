//! Token types and the pull-based token stream contract.
//!
//! This module defines the data that flows between analysis stages.
//!
//! # Core Types
//!
//! - [`Token`] - A single token with text, offsets, type and position data
//! - [`TokenType`] - Alphanumeric piece or punctuation
//! - [`ComposedTerm`] - Builder for tokens that span several source tokens
//! - [`TokenStream`] - The stage contract: `reset`, `next_token`, `close`
//! - [`VecTokenStream`] - A rewindable stream over an owned token list
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("2015", 3, 10, 14);
//! assert_eq!(token.text, "2015");
//! assert_eq!(token.token_type, TokenType::Alphanum);
//! assert_eq!(token.position_increment, 1);
//!
//! let slash = Token::punctuation("/", 2, 9, 10);
//! assert!(slash.is_punctuation());
//! assert_eq!(slash.token_type.label(), "<PUNCTATION>");
//! ```
//!
//! Draining a stream:
//!
//! ```
//! use identigram::analysis::token::{IntoTokenStream, Token, TokenStream};
//!
//! let mut stream = vec![Token::new("I", 0), Token::new("US", 1)].into_token_stream();
//! let tokens = stream.collect_tokens().unwrap();
//! assert_eq!(tokens.len(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Type label of an alphanumeric piece.
pub const ALPHANUM_LABEL: &str = "<ALPHANUM>";

/// Type label of a punctuation token.
pub const PUNCTATION_LABEL: &str = "<PUNCTATION>";

/// A token represents a single unit of text after tokenization.
///
/// Offsets count UTF-16 code units of the original input, the unit search
/// engines use for highlighting. `"I. ÚS 22/2015"` spans `[0, 13)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The absolute position of the token in the stream (0-based)
    pub position: usize,

    /// The offset where this token starts in the original text
    pub start_offset: usize,

    /// The offset where this token ends in the original text
    pub end_offset: usize,

    /// Alphanumeric piece or punctuation
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1: next position
    /// - 0: same position as the previous token (stacked)
    /// - >1: positions were skipped (e.g. removed punctuation)
    pub position_increment: usize,
}

/// Token type classification.
///
/// Only two kinds of tokens exist in identifier analysis: the alphanumeric
/// pieces of an identifier and the punctuation between them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Letters, digits and combining marks
    #[default]
    #[serde(rename = "<ALPHANUM>")]
    Alphanum,
    /// A single punctuation character
    #[serde(rename = "<PUNCTATION>")]
    Punctuation,
}

impl TokenType {
    /// The type label as exposed to the host engine.
    pub fn label(&self) -> &'static str {
        match self {
            TokenType::Alphanum => ALPHANUM_LABEL,
            TokenType::Punctuation => PUNCTATION_LABEL,
        }
    }

    /// Parse a type label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            ALPHANUM_LABEL => Some(TokenType::Alphanum),
            PUNCTATION_LABEL => Some(TokenType::Punctuation),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Token {
    /// Create a new alphanumeric token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            token_type: TokenType::Alphanum,
            position_increment: 1,
        }
    }

    /// Create a new alphanumeric token with text, position, and offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Create a new punctuation token with text, position, and offsets.
    pub fn punctuation<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token::with_offsets(text, position, start_offset, end_offset)
            .with_token_type(TokenType::Punctuation)
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if this token is punctuation.
    pub fn is_punctuation(&self) -> bool {
        self.token_type == TokenType::Punctuation
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A term composed from several source tokens.
///
/// Appending a token extends the text and widens the end offset. The first
/// append into an empty term also fixes the start offset and position.
/// Delimiter pushes only extend the text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposedTerm {
    text: String,
    position: usize,
    start_offset: usize,
    end_offset: usize,
    position_increment: usize,
}

impl ComposedTerm {
    /// Create a new empty composed term.
    pub fn new() -> Self {
        ComposedTerm {
            position_increment: 1,
            ..Default::default()
        }
    }

    /// The text composed so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start offset of the first appended token.
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// End offset of the last appended token.
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Check if nothing has been composed yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a source token.
    pub fn append(&mut self, source: &Token) {
        if self.text.is_empty() {
            self.start_offset = source.start_offset;
            self.position = source.position;
            self.position_increment = source.position_increment;
        }
        self.text.push_str(&source.text);
        self.end_offset = self.end_offset.max(source.end_offset);
    }

    /// Append text without touching the offsets.
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append a delimiter character without touching the offsets.
    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Remove the last character of the text.
    pub fn pop_char(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Override the position increment of the composed token.
    pub fn set_position_increment(&mut self, increment: usize) {
        self.position_increment = increment;
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        *self = ComposedTerm::new();
    }

    /// Copy the composed attributes into a new alphanumeric token.
    pub fn to_token(&self) -> Token {
        Token {
            text: self.text.clone(),
            position: self.position,
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            token_type: TokenType::Alphanum,
            position_increment: self.position_increment,
        }
    }
}

/// A stage in the analysis pipeline.
///
/// Stages are pull iterators: each call to [`next_token`](Self::next_token)
/// produces the next token or `None` at end-of-stream. A stage reads from at
/// most one upstream stage and owns its buffered state.
///
/// - `reset` returns the stage (and its upstream) to the post-construction
///   state and may be called repeatedly.
/// - `close` releases buffered state; calling it more than once is harmless.
///
/// A stage is not meant to be shared between threads, but it can be moved to
/// another thread (`Send`).
pub trait TokenStream: Send {
    /// Rewind the stream before reading.
    fn reset(&mut self) -> Result<()>;

    /// Produce the next token, or `None` at end-of-stream.
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// Release buffered state.
    fn close(&mut self) -> Result<()>;

    /// Drain the remaining tokens into a vector.
    fn collect_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// A boxed token stream, the unit that analysis components pass around.
pub type BoxTokenStream = Box<dyn TokenStream>;

impl<T: TokenStream + ?Sized> TokenStream for Box<T> {
    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        (**self).next_token()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// A token stream over an owned list of tokens.
///
/// `reset` rewinds to the first token; `close` drops the tokens.
#[derive(Clone, Debug, Default)]
pub struct VecTokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl VecTokenStream {
    /// Create a stream that yields the given tokens in order.
    pub fn new(tokens: Vec<Token>) -> Self {
        VecTokenStream { tokens, cursor: 0 }
    }
}

impl TokenStream for VecTokenStream {
    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        Ok(token)
    }

    fn close(&mut self) -> Result<()> {
        self.tokens.clear();
        self.cursor = 0;
        Ok(())
    }
}

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> BoxTokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> BoxTokenStream {
        Box::new(VecTokenStream::new(self))
    }
}
