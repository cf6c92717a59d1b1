//! # Identigram
//!
//! Token filters for indexing identifiers such as court file numbers, ECLI
//! codes or IP addresses.
//!
//! ## Features
//!
//! - Punctuation-aware tokenizer that keeps punctuation as separate tokens
//! - Identifier filter collapsing a whole identifier into one token
//! - Identifier n-gram filter emitting every run of identifier pieces
//! - Composition filter with speculative read-ahead and rollback
//! - Analyzer pipelines configurable from JSON, and a CLI to try them

pub mod analysis;
pub mod cli;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
