//! Integration tests for identifier analysis pipelines.

use std::collections::BTreeMap;
use std::sync::Arc;

use identigram::analysis::analyzer::Analyzer;
use identigram::analysis::analyzer::pipeline::PipelineAnalyzer;
use identigram::analysis::config::AnalyzerConfig;
use identigram::analysis::registry::filter_from_name;
use identigram::analysis::token::{Token, TokenStream, TokenType};
use identigram::analysis::token_filter::DelimiterPolicy;
use identigram::analysis::token_filter::identifier::IdentifierFilter;
use identigram::analysis::token_filter::identifier_ngram::{
    IdentifierNGramConfig, IdentifierNGramFilter,
};
use identigram::analysis::token_filter::punctuation::PunctuationFilter;
use identigram::analysis::tokenizer::Tokenizer;
use identigram::analysis::tokenizer::punctuation::PunctuationTokenizer;
use identigram::error::{IdentigramError, Result};

const COURT_FILE_ID: &str = "I. ÚS 22/2015";
const ECLI: &str = "ECLI:SK:USSR:2015:1.US.14.2015.1";
const INPUTS: &[&str] = &[
    COURT_FILE_ID,
    ECLI,
    "192.168.1.254",
    "(22/2015).",
    "Sp. zn. 4 Tdo 1279/2017-35",
    "",
];

fn tokenize(text: &str) -> Result<Vec<Token>> {
    PunctuationTokenizer::new().tokenize(text)?.collect_tokens()
}

fn ngrams(text: &str, config: IdentifierNGramConfig) -> Result<Vec<Token>> {
    let input = PunctuationTokenizer::new().tokenize(text)?;
    IdentifierNGramFilter::new(input, config)?.collect_tokens()
}

/// The text covered by a span of UTF-16 code units.
fn covered(text: &str, start: usize, end: usize) -> &str {
    let mut units = 0;
    let mut from = text.len();
    let mut to = text.len();
    for (index, c) in text.char_indices() {
        if units == start {
            from = from.min(index);
        }
        if units == end {
            to = index;
            break;
        }
        units += c.len_utf16();
    }
    &text[from.min(to)..to]
}

fn pieces(text: &str) -> Result<Vec<Token>> {
    Ok(tokenize(text)?
        .into_iter()
        .filter(|t| t.token_type == TokenType::Alphanum)
        .collect())
}

#[test]
fn test_court_file_id_scenarios() -> Result<()> {
    let input = PunctuationTokenizer::new().tokenize(COURT_FILE_ID)?;
    let tokens = IdentifierFilter::new(input, DelimiterPolicy::Retain).collect_tokens()?;
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, "I.ÚS22/2015");
    assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 13));
    assert_eq!(tokens[0].end_offset, COURT_FILE_ID.encode_utf16().count());

    let input = PunctuationTokenizer::new().tokenize(COURT_FILE_ID)?;
    let tokens = IdentifierFilter::new(input, DelimiterPolicy::RewriteTo('.')).collect_tokens()?;
    assert_eq!(tokens[0].text, "I.ÚS.22.2015");
    assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 13));

    let tokens = ngrams(COURT_FILE_ID, IdentifierNGramConfig::new(3, 3))?;
    let spans: Vec<_> = tokens
        .iter()
        .map(|t| (t.text.as_str(), t.start_offset, t.end_offset))
        .collect();
    assert_eq!(spans, vec![("I.ÚS22", 0, 8), ("ÚS22/2015", 3, 13)]);

    let tokens = ngrams(
        COURT_FILE_ID,
        IdentifierNGramConfig::new(4, 4).include_identifier(true),
    )?;
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, "I.ÚS22/2015");
    assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 13));
    Ok(())
}

#[test]
fn test_ecli_scenarios() -> Result<()> {
    let tokens = ngrams(ECLI, IdentifierNGramConfig::new(3, 3).include_identifier(true))?;
    assert_eq!(tokens.len(), 8);
    assert_eq!(tokens[7].text, ECLI);

    let tokens = ngrams(ECLI, IdentifierNGramConfig::new(3, 8))?;
    assert_eq!(tokens.len(), 27);
    let mut texts: Vec<_> = tokens.iter().map(|t| t.text.clone()).collect();
    texts.sort();
    texts.dedup();
    assert_eq!(texts.len(), 27);
    Ok(())
}

#[test]
fn test_offsets_slice_original_text() -> Result<()> {
    let configs = [
        IdentifierNGramConfig::new(1, 1),
        IdentifierNGramConfig::new(1, 3).include_identifier(true),
        IdentifierNGramConfig::new(2, 8).delimiter(DelimiterPolicy::DropAll),
    ];

    for text in INPUTS {
        for config in configs {
            for token in ngrams(text, config)? {
                assert!(token.start_offset <= token.end_offset, "{token:?}");
                assert!(token.end_offset <= text.encode_utf16().count(), "{token:?}");

                // With retained delimiters the token is the covered text minus whitespace.
                if config.delimiter == DelimiterPolicy::Retain {
                    let covered: String = covered(text, token.start_offset, token.end_offset)
                        .chars()
                        .filter(|c| !c.is_whitespace())
                        .collect();
                    assert_eq!(covered, token.text);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_reset_is_idempotent_for_every_stage() -> Result<()> {
    fn drive_twice(mut stream: Box<dyn TokenStream>) -> Result<()> {
        let first = stream.collect_tokens()?;
        stream.reset()?;
        let second = stream.collect_tokens()?;
        assert_eq!(first, second);
        stream.close()?;
        stream.close()
    }

    for text in INPUTS {
        let input = || PunctuationTokenizer::new().tokenize(text);
        drive_twice(input()?)?;
        drive_twice(Box::new(PunctuationFilter::new(input()?)))?;
        drive_twice(Box::new(IdentifierFilter::new(input()?, DelimiterPolicy::RewriteTo('-'))))?;
        drive_twice(Box::new(IdentifierNGramFilter::new(
            input()?,
            IdentifierNGramConfig::new(1, 4).include_identifier(true),
        )?))?;
    }
    Ok(())
}

#[test]
fn test_punctuation_filter_passthrough() -> Result<()> {
    let input = PunctuationTokenizer::new().tokenize("ECLI SK USSR 2015")?;
    let filtered = PunctuationFilter::new(input).collect_tokens()?;
    assert_eq!(filtered, tokenize("ECLI SK USSR 2015")?);

    let input = PunctuationTokenizer::new().tokenize(ECLI)?;
    let filtered = PunctuationFilter::new(input).collect_tokens()?;
    let spans = |tokens: &[Token]| -> Vec<(String, usize, usize)> {
        tokens
            .iter()
            .map(|t| (t.text.clone(), t.start_offset, t.end_offset))
            .collect()
    };
    assert_eq!(spans(&filtered), spans(&pieces(ECLI)?));
    assert!(filtered[1..].iter().all(|t| t.position_increment == 2));
    Ok(())
}

#[test]
fn test_sliding_window_coverage() -> Result<()> {
    for text in INPUTS {
        let n = pieces(text)?.len();
        for k in 1..=n + 1 {
            let tokens = ngrams(text, IdentifierNGramConfig::new(k, k))?;
            assert_eq!(tokens.len(), (n + 1).saturating_sub(k), "{text} k={k}");

            for token in &tokens {
                let covered = tokenize(covered(text, token.start_offset, token.end_offset))?;
                let count = covered
                    .iter()
                    .filter(|t| t.token_type == TokenType::Alphanum)
                    .count();
                assert_eq!(count, k);
            }
        }
    }
    Ok(())
}

#[test]
fn test_ngram_ordering() -> Result<()> {
    let starts: Vec<usize> = pieces(ECLI)?.iter().map(|t| t.start_offset).collect();
    let tokens = ngrams(ECLI, IdentifierNGramConfig::new(2, 5))?;

    let keys: Vec<(usize, usize)> = tokens
        .iter()
        .map(|t| {
            let first = starts.iter().position(|&s| s == t.start_offset).unwrap();
            (first, t.end_offset)
        })
        .collect();

    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    Ok(())
}

#[test]
fn test_identifier_reversibility() -> Result<()> {
    for text in INPUTS {
        let expected: String = tokenize(text)?.iter().map(|t| t.text.as_str()).collect();
        let input = PunctuationTokenizer::new().tokenize(text)?;
        let tokens = IdentifierFilter::new(input, DelimiterPolicy::Retain).collect_tokens()?;
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, expected);
    }
    Ok(())
}

struct BrokenStream {
    tokens: Vec<Token>,
}

impl TokenStream for BrokenStream {
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        if self.tokens.is_empty() {
            return Err(IdentigramError::analysis("malformed input"));
        }
        Ok(Some(self.tokens.remove(0)))
    }

    fn close(&mut self) -> Result<()> {
        self.tokens.clear();
        Ok(())
    }
}

#[test]
fn test_upstream_errors_propagate() -> Result<()> {
    let broken = || -> Box<dyn TokenStream> {
        Box::new(BrokenStream {
            tokens: vec![Token::with_offsets("22", 0, 0, 2)],
        })
    };

    let mut filter = IdentifierFilter::new(broken(), DelimiterPolicy::Retain);
    assert!(matches!(filter.next_token(), Err(IdentigramError::Analysis(_))));
    filter.close()?;

    let mut filter = IdentifierNGramFilter::new(broken(), IdentifierNGramConfig::new(1, 2))?;
    assert!(matches!(filter.next_token(), Err(IdentigramError::Analysis(_))));
    filter.close()?;

    let mut filter = PunctuationFilter::new(broken());
    assert!(filter.next_token()?.is_some());
    assert!(filter.next_token().is_err());
    filter.close()
}

#[test]
fn test_configured_pipeline() -> Result<()> {
    let config = AnalyzerConfig::from_json_str(
        r#"{
            "name": "ip",
            "filters": [{"type": "identifierNGram", "minGramSize": 1, "maxGramSize": 3}]
        }"#,
    )?;
    let analyzer = config.build()?;
    assert_eq!(analyzer.name(), "ip");

    let tokens = analyzer.analyze("192.168.1")?.collect_tokens()?;
    let spans: Vec<_> = tokens
        .iter()
        .map(|t| (t.text.as_str(), t.start_offset, t.end_offset))
        .collect();
    assert_eq!(
        spans,
        vec![
            ("192", 0, 3),
            ("192.168", 0, 7),
            ("192.168.1", 0, 9),
            ("168", 4, 7),
            ("168.1", 4, 9),
            ("1", 8, 9),
        ]
    );
    Ok(())
}

#[test]
fn test_analyzer_is_shareable_across_threads() -> Result<()> {
    let mut args = BTreeMap::new();
    args.insert("minGramSize".to_string(), "2".to_string());
    args.insert("maxGramSize".to_string(), "2".to_string());
    let analyzer = Arc::new(
        PipelineAnalyzer::new(Arc::new(PunctuationTokenizer::new()))
            .add_filter(filter_from_name("identifierNGram", args)?),
    );

    let handles: Vec<_> = INPUTS
        .iter()
        .map(|text| {
            let analyzer = Arc::clone(&analyzer);
            let text = text.to_string();
            std::thread::spawn(move || -> Result<usize> {
                Ok(analyzer.analyze(&text)?.collect_tokens()?.len())
            })
        })
        .collect();

    for (handle, text) in handles.into_iter().zip(INPUTS) {
        let count = handle.join().expect("analysis thread panicked")?;
        assert_eq!(count, pieces(text)?.len().saturating_sub(1));
    }
    Ok(())
}
