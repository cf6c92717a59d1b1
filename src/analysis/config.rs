//! JSON analyzer configuration.
//!
//! ```json
//! {
//!   "name": "court_file_id",
//!   "tokenizer": { "type": "punctation" },
//!   "filters": [
//!     { "type": "identifierNGram", "minGramSize": 2, "maxGramSize": 4, "includeIdentifier": true }
//!   ]
//! }
//! ```
//!
//! Option values may be strings, numbers or booleans. They are converted to
//! the string option maps the component factories read.
//!
//! # Examples
//!
//! ```
//! use identigram::analysis::analyzer::Analyzer;
//! use identigram::analysis::config::AnalyzerConfig;
//! use identigram::analysis::token::TokenStream;
//!
//! let config = AnalyzerConfig::from_json_str(
//!     r#"{"filters": [{"type": "identifier", "customDelimiter": "."}]}"#,
//! )
//! .unwrap();
//! let analyzer = config.build().unwrap();
//!
//! let tokens = analyzer.analyze("I. ÚS 22/2015").unwrap().collect_tokens().unwrap();
//! assert_eq!(tokens[0].text, "I.ÚS.22.2015");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::registry::{filter_from_name, tokenizer_from_name};
use crate::error::{IdentigramError, Result};

/// One tokenizer or filter: its registered name plus its options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Registered component name
    #[serde(rename = "type")]
    pub kind: String,
    /// Component options
    #[serde(flatten)]
    pub options: BTreeMap<String, Value>,
}

impl ComponentConfig {
    /// Create a component without options.
    pub fn new<S: Into<String>>(kind: S) -> Self {
        ComponentConfig {
            kind: kind.into(),
            options: BTreeMap::new(),
        }
    }

    /// Add an option.
    pub fn with_option<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Convert the options to the string map factories expect.
    pub fn args(&self) -> Result<BTreeMap<String, String>> {
        self.options
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(IdentigramError::config(format!(
                            "option '{key}' of '{}' must be a string, number or boolean, got {other}",
                            self.kind
                        )));
                    }
                };
                Ok((key.clone(), value))
            })
            .collect()
    }
}

fn default_tokenizer() -> ComponentConfig {
    ComponentConfig::new("punctation")
}

/// Configuration of a [`PipelineAnalyzer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Analyzer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tokenizer (defaults to `punctation`)
    #[serde(default = "default_tokenizer")]
    pub tokenizer: ComponentConfig,
    /// Filters, applied in order
    #[serde(default)]
    pub filters: Vec<ComponentConfig>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            name: None,
            tokenizer: default_tokenizer(),
            filters: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Append a filter.
    pub fn add_filter(mut self, filter: ComponentConfig) -> Self {
        self.filters.push(filter);
        self
    }

    /// Build the analyzer. Component options are validated here.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let tokenizer = tokenizer_from_name(&self.tokenizer.kind, self.tokenizer.args()?)?;
        let mut analyzer = PipelineAnalyzer::new(tokenizer);

        for filter in &self.filters {
            analyzer = analyzer.add_filter(filter_from_name(&filter.kind, filter.args()?)?);
        }

        if let Some(name) = &self.name {
            analyzer = analyzer.with_name(name.clone());
        }
        Ok(analyzer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;
    use crate::analysis::token::TokenStream;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_config() {
        let config = AnalyzerConfig::from_json_str(
            r#"{
                "name": "ids",
                "tokenizer": {"type": "punctuation"},
                "filters": [
                    {
                        "type": "identifierNGram",
                        "minGramSize": 1,
                        "maxGramSize": "2",
                        "includeIdentifier": true
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("ids"));
        assert_eq!(config.tokenizer.kind, "punctuation");
        assert_eq!(config.filters.len(), 1);

        let args = config.filters[0].args().unwrap();
        assert_eq!(args["minGramSize"], "1");
        assert_eq!(args["maxGramSize"], "2");
        assert_eq!(args["includeIdentifier"], "true");
    }

    #[test]
    fn test_build_and_analyze() {
        let config = AnalyzerConfig::default().add_filter(
            ComponentConfig::new("identifierNGram")
                .with_option("minGramSize", 3)
                .with_option("maxGramSize", 3),
        );
        let analyzer = config.build().unwrap();
        assert_eq!(analyzer.name(), "pipeline_punctation");

        let tokens = analyzer
            .analyze("I. ÚS 22/2015")
            .unwrap()
            .collect_tokens()
            .unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["I.ÚS22", "ÚS22/2015"]);
    }

    #[test]
    fn test_invalid_option_values() {
        let config = AnalyzerConfig::default().add_filter(
            ComponentConfig::new("identifier").with_option("customDelimiter", Value::Null),
        );
        assert!(config.build().unwrap_err().is_config());

        let config = AnalyzerConfig::default()
            .add_filter(ComponentConfig::new("identifier").with_option("ignoreDelimiter", true));
        let err = config.build().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("Unknown parameters: {ignoreDelimiter=true}"));

        let config = AnalyzerConfig::default()
            .add_filter(ComponentConfig::new("identifierNGram").with_option("maxGramSize", 0));
        assert!(config.build().unwrap_err().is_config());

        let config = AnalyzerConfig::default().add_filter(ComponentConfig::new("stemmer"));
        assert!(config.build().is_err());
    }

    #[test]
    fn test_invalid_json() {
        let err = AnalyzerConfig::from_json_str("{\"filters\": 1}").unwrap_err();
        assert!(matches!(err, IdentigramError::Json(_)));

        let err = AnalyzerConfig::from_json_str("{\"filters\": [{}]}").unwrap_err();
        assert!(matches!(err, IdentigramError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"filters": [{{"type": "identifier", "customDelimiter": ""}}]}}"#
        )
        .unwrap();

        let analyzer = AnalyzerConfig::from_file(file.path()).unwrap().build().unwrap();
        let tokens = analyzer
            .analyze("ECLI:SK:1")
            .unwrap()
            .collect_tokens()
            .unwrap();
        assert_eq!(tokens[0].text, "ECLISK1");

        let err = AnalyzerConfig::from_file("/nonexistent/identigram.json").unwrap_err();
        assert!(matches!(err, IdentigramError::Io(_)));
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let config = AnalyzerConfig::default()
            .add_filter(ComponentConfig::new("identifier").with_option("customDelimiter", "-"));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["tokenizer"]["type"], "punctation");
        assert_eq!(json["filters"][0]["customDelimiter"], "-");
        assert!(json.get("name").is_none());
    }
}
