//! Speculative composition with rollback.
//!
//! A [`CompositionFilter`] reads tokens ahead and asks a
//! [`CompositionClassifier`] whether the tokens seen so far form a composite
//! (for example a multi-word name). A finished composition is emitted as one
//! token; an abandoned one is replayed token by token in arrival order, so a
//! failed attempt never loses or reorders input.
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::token::{IntoTokenStream, Token, TokenStream};
//! use identigram::analysis::token_filter::composition::{CompositionFilter, CompositionState};
//!
//! // "[" opens a group, "]" closes it.
//! let classify = |token: &str, composed: &[Token]| match token {
//!     "[" => CompositionState::Continue,
//!     "]" if !composed.is_empty() => CompositionState::FinishValid,
//!     _ if !composed.is_empty() => CompositionState::Continue,
//!     _ => CompositionState::FinishInvalid,
//! };
//!
//! let tokens = vec![
//!     Token::with_offsets("[", 0, 0, 1),
//!     Token::with_offsets("a", 1, 1, 2),
//!     Token::with_offsets("]", 2, 2, 3),
//! ];
//! let mut filter = CompositionFilter::new(tokens.into_token_stream(), classify);
//! let token = filter.next_token().unwrap().unwrap();
//! assert_eq!(token.text, "[ a ]");
//! assert_eq!((token.start_offset, token.end_offset), (0, 3));
//! ```

use std::collections::VecDeque;

use log::trace;

use crate::analysis::token::{BoxTokenStream, ComposedTerm, Token, TokenStream};
use crate::error::Result;

/// Default separator placed between composed tokens.
pub const DEFAULT_WHITESPACE: &str = " ";

/// Verdict of a classifier on the token just read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompositionState {
    /// The token belongs to the composition; keep reading.
    Continue,
    /// The token completes the composition.
    FinishValid,
    /// The composition is complete, but the token is not part of it.
    FinishInvalid,
    /// Abandon the composition and replay everything read since the last commit.
    Rollback,
}

/// Decides how tokens compose.
pub trait CompositionClassifier: Send {
    /// Classify `token` given the tokens already in the composition.
    fn validate_token(&self, token: &str, composed: &[Token]) -> CompositionState;

    /// Decide what happens when the upstream ends while composing.
    ///
    /// `last` is the verdict on the final token read, if any. Returning
    /// [`CompositionState::Rollback`] replays the pending tokens, any other
    /// `Some` commits the pending composition, `None` ends the stream.
    fn validate_finish(&self, last: Option<CompositionState>) -> Option<CompositionState> {
        last
    }

    /// Separator between composed tokens.
    fn whitespace(&self) -> &str {
        DEFAULT_WHITESPACE
    }
}

impl<F> CompositionClassifier for F
where
    F: Fn(&str, &[Token]) -> CompositionState + Send,
{
    fn validate_token(&self, token: &str, composed: &[Token]) -> CompositionState {
        self(token, composed)
    }
}

/// The composite being built and the tokens it was built from.
#[derive(Debug)]
struct Composition {
    term: ComposedTerm,
    terms: Vec<Token>,
}

impl Composition {
    fn append(&mut self, token: &Token, whitespace: &str) {
        if !self.term.is_empty() {
            self.term.push_str(whitespace);
        }
        self.term.append(token);
        self.terms.push(token.clone());
    }

    fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    fn clear(&mut self) {
        self.term.clear();
        self.terms.clear();
    }
}

/// A stage that composes tokens under the control of a classifier.
pub struct CompositionFilter<C> {
    input: BoxTokenStream,
    classifier: C,
    composition: Composition,
    token_stack: Vec<Token>,
    rollback_stack: VecDeque<Token>,
    previous: Option<Token>,
    rollback: bool,
}

impl<C: CompositionClassifier> CompositionFilter<C> {
    /// Wrap the given stream.
    pub fn new(input: BoxTokenStream, classifier: C) -> Self {
        CompositionFilter {
            input,
            classifier,
            composition: Composition {
                term: ComposedTerm::new(),
                terms: Vec::new(),
            },
            token_stack: Vec::new(),
            rollback_stack: VecDeque::new(),
            previous: None,
            rollback: false,
        }
    }

    /// Get the classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    fn commit(&mut self) {
        self.token_stack.push(self.composition.term.to_token());
        self.composition.clear();
    }

    fn start_rollback(&mut self) {
        self.composition.clear();
        trace!("rolling back {} tokens", self.rollback_stack.len());
        if let Some(token) = self.rollback_stack.pop_front() {
            self.token_stack.push(token);
        }
        self.rollback = !self.rollback_stack.is_empty();
    }

    /// Read until a token is queued on `token_stack` or the upstream ends.
    fn advance(&mut self) -> Result<()> {
        if self.rollback {
            if let Some(token) = self.rollback_stack.pop_front() {
                self.rollback = !self.rollback_stack.is_empty();
                self.token_stack.push(token);
                return Ok(());
            }
            self.rollback = false;
        } else {
            self.rollback_stack.clear();
        }

        let mut current = match self.previous.take() {
            Some(token) => Some(token),
            None => self.input.next_token()?,
        };

        let mut last = None;
        while let Some(token) = current {
            self.rollback_stack.push_back(token.clone());
            let state = self
                .classifier
                .validate_token(&token.text, &self.composition.terms);
            last = Some(state);

            match state {
                CompositionState::Continue => {
                    self.composition.append(&token, self.classifier.whitespace());
                }
                CompositionState::FinishValid => {
                    self.composition.append(&token, self.classifier.whitespace());
                    self.commit();
                    return Ok(());
                }
                CompositionState::FinishInvalid => {
                    if self.composition.is_empty() {
                        self.rollback_stack.clear();
                        self.token_stack.push(token);
                    } else {
                        self.previous = Some(token);
                        self.commit();
                    }
                    return Ok(());
                }
                CompositionState::Rollback => {
                    self.start_rollback();
                    return Ok(());
                }
            }

            current = self.input.next_token()?;
        }

        match self.classifier.validate_finish(last) {
            Some(CompositionState::Rollback) => self.start_rollback(),
            Some(_) if !self.composition.is_empty() => self.commit(),
            _ => self.composition.clear(),
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.composition.clear();
        self.token_stack.clear();
        self.rollback_stack.clear();
        self.previous = None;
        self.rollback = false;
    }
}

impl<C: CompositionClassifier> TokenStream for CompositionFilter<C> {
    fn reset(&mut self) -> Result<()> {
        self.input.reset()?;
        self.clear();
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        if self.token_stack.is_empty() {
            self.advance()?;
        }
        Ok(self.token_stack.pop())
    }

    fn close(&mut self) -> Result<()> {
        self.clear();
        self.input.close()
    }
}
