//! Rewrite a query in canonical form

use super::CliError;
use crate::parse;

/// Options for the format command
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Raw query text
    pub input: Option<Vec<u8>>,
}

pub fn execute_format(options: &FormatOptions) -> Result<String, CliError> {
    let input = options.input.as_deref().ok_or(CliError::NoInput)?;
    Ok(parse(input)?.statement())
}
