//! Dump the scanner's chunks

use super::CliError;
use crate::scanner::Scanner;

/// Options for the scan command
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Raw query text
    pub input: Option<Vec<u8>>,
}

/// Scans the input and returns one `token("...")` line per chunk.
pub fn execute_scan(options: &ScanOptions) -> Result<Vec<String>, CliError> {
    let input = options.input.as_deref().ok_or(CliError::NoInput)?;

    Ok(Scanner::new(input)
        .map(|chunk| format!("token({})", quote(chunk.bytes)))
        .collect())
}

/// Double-quotes a chunk, escaping text the way `{:?}` does and each
/// malformed byte as `\xNN`.
fn quote(bytes: &[u8]) -> String {
    let mut quoted = String::from('"');
    for chunk in bytes.utf8_chunks() {
        let valid = format!("{:?}", chunk.valid());
        quoted.push_str(&valid[1..valid.len() - 1]);
        for byte in chunk.invalid() {
            quoted.push_str(&format!("\\x{byte:02x}"));
        }
    }
    quoted.push('"');
    quoted
}
