//! Text analysis for identifiers.
//!
//! This module provides a punctuation-aware tokenizer, the identifier token
//! filters built on top of it, and the pipeline and configuration layers
//! that assemble them into analyzers.

pub mod analyzer;
pub mod args;
pub mod config;
pub mod registry;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
