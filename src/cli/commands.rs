//! Command implementations for the identigram CLI.

use std::fs;
use std::io::{self, Read};

use log::{debug, info};
use serde_json::Value;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::config::{AnalyzerConfig, ComponentConfig};
use crate::analysis::registry::{FILTER_NAMES, TOKENIZER_NAMES};
use crate::analysis::token::TokenStream;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{IdentigramError, Result};

/// Execute a CLI command.
pub fn execute_command(args: IdentigramArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, &args),
        Command::Components => list_components(&args),
    }
}

/// Analyze text and print the tokens.
fn analyze(args: &AnalyzeArgs, cli_args: &IdentigramArgs) -> Result<()> {
    let analyzer = build_analyzer(args)?;
    info!("using analyzer {analyzer:?}");

    let input = read_input(args)?;
    let texts: Vec<&str> = if args.lines {
        input.lines().filter(|line| !line.trim().is_empty()).collect()
    } else {
        vec![input.trim_end_matches(['\r', '\n'])]
    };

    let mut results = Vec::with_capacity(texts.len());
    for text in texts {
        let mut stream = analyzer.analyze(text)?;
        let tokens = stream.collect_tokens()?;
        stream.close()?;
        debug!("'{text}' produced {} tokens", tokens.len());

        results.push(AnalysisResult {
            text: text.to_string(),
            analyzer: analyzer.name().to_string(),
            tokens,
        });
    }

    output_analysis(&results, cli_args)
}

/// List the registered component names.
fn list_components(cli_args: &IdentigramArgs) -> Result<()> {
    let list = ComponentList {
        tokenizers: TOKENIZER_NAMES.iter().map(|s| s.to_string()).collect(),
        filters: FILTER_NAMES.iter().map(|s| s.to_string()).collect(),
    };
    output_components(&list, cli_args)
}

/// Build the analyzer from a config file or from the command line flags.
pub fn build_analyzer(args: &AnalyzeArgs) -> Result<PipelineAnalyzer> {
    let config = match &args.config {
        Some(path) => {
            debug!("loading analyzer config from {}", path.display());
            AnalyzerConfig::from_file(path)?
        }
        None => config_from_flags(args)?,
    };
    config.build()
}

fn config_from_flags(args: &AnalyzeArgs) -> Result<AnalyzerConfig> {
    let mut filters: Vec<ComponentConfig> =
        args.filters.iter().map(ComponentConfig::new).collect();

    if !args.args.is_empty() {
        let last = filters.last_mut().ok_or_else(|| {
            IdentigramError::config("--arg requires a preceding --filter".to_string())
        })?;
        for arg in &args.args {
            let (key, value) = parse_key_value(arg)?;
            last.options.insert(key, Value::String(value));
        }
    }

    Ok(AnalyzerConfig {
        name: None,
        tokenizer: ComponentConfig::new(args.tokenizer.as_str()),
        filters,
    })
}

/// Split a `key=value` option.
fn parse_key_value(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(IdentigramError::config(format!(
            "Invalid option '{arg}', expected KEY=VALUE"
        ))),
    }
}

fn read_input(args: &AnalyzeArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.input {
        return Ok(fs::read_to_string(path)?);
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}
