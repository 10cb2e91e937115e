//! Parse a query and report its tree

use log::info;

use super::CliError;
use crate::parse;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Raw query text
    pub input: Option<Vec<u8>>,
    /// Only validate syntax, don't print the tree
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// The parsed query as JSON
    Success(serde_json::Value),
}

impl CheckResult {
    /// Text the CLI prints for this result, with the tree indented when
    /// `pretty` is set.
    pub fn render(&self, pretty: bool) -> Result<String, CliError> {
        match self {
            CheckResult::SyntaxValid => Ok("Syntax is valid".to_string()),
            CheckResult::Success(tree) if pretty => Ok(serde_json::to_string_pretty(tree)?),
            CheckResult::Success(tree) => Ok(serde_json::to_string(tree)?),
        }
    }
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let input = options.input.as_deref().ok_or(CliError::NoInput)?;

    let query = parse(input)?;
    info!(
        "parsed query with {} attribute(s) and {} relation(s)",
        query.select.attributes.len(),
        query.from.relations.len()
    );

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    Ok(CheckResult::Success(serde_json::to_value(&query)?))
}
