//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{IdentigramArgs, OutputFormat};
use crate::error::Result;

/// Tokens produced for one input text.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub analyzer: String,
    pub tokens: Vec<Token>,
}

/// Registered component names.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentList {
    pub tokenizers: Vec<String>,
    pub filters: Vec<String>,
}

/// Print analysis results in the selected format.
pub fn output_analysis(results: &[AnalysisResult], args: &IdentigramArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            for result in results {
                if args.verbosity() > 1 {
                    println!("{} ({})", result.text, result.analyzer);
                } else {
                    println!("{}", result.text);
                }
                for token in &result.tokens {
                    println!("  {}", format_token(token));
                }
            }
            Ok(())
        }
        OutputFormat::Json => output_json(results, args),
    }
}

/// Print the component names in the selected format.
pub fn output_components(list: &ComponentList, args: &IdentigramArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("Tokenizers:");
            for name in &list.tokenizers {
                println!("  {name}");
            }
            println!("Filters:");
            for name in &list.filters {
                println!("  {name}");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(list, args),
    }
}

/// One token per line: position, increment, offsets, type, text.
pub fn format_token(token: &Token) -> String {
    format!(
        "{:>4} +{:<2} [{}, {}) {:<13} {}",
        token.position,
        token.position_increment,
        token.start_offset,
        token.end_offset,
        token.token_type.label(),
        token.text
    )
}

/// Output in JSON format.
fn output_json<T: Serialize + ?Sized>(result: &T, args: &IdentigramArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
