//! Pipeline analyzer that combines a tokenizer and token filters.
//!
//! The PipelineAnalyzer tokenizes the input and then wraps the resulting
//! stream with each filter, in the order the filters were added.
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::analyzer::Analyzer;
//! use identigram::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use identigram::analysis::token::TokenStream;
//! use identigram::analysis::token_filter::identifier_ngram::{
//!     IdentifierNGramConfig, IdentifierNGramFilterFactory,
//! };
//! use identigram::analysis::tokenizer::punctuation::PunctuationTokenizer;
//! use std::sync::Arc;
//!
//! let ngrams = IdentifierNGramFilterFactory::new(IdentifierNGramConfig::new(2, 2)).unwrap();
//! let analyzer = PipelineAnalyzer::new(Arc::new(PunctuationTokenizer::new()))
//!     .add_filter(Arc::new(ngrams))
//!     .with_name("court_file_id");
//!
//! let tokens = analyzer.analyze("22/2015").unwrap().collect_tokens().unwrap();
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "22/2015");
//! ```

use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::BoxTokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<BoxTokenStream> {
        debug!("analyzing {} bytes with '{}'", text.len(), self.name);

        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
