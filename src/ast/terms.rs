use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Attribute reference, possibly qualified (`r.a`).
///
/// Not checked against any schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Attribute {
    pub name: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Attribute { name: name.into() }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Relation reference in a FROM list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Relation {
    pub name: String,
}

impl Relation {
    pub fn new(name: impl Into<String>) -> Self {
        Relation { name: name.into() }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// LIKE pattern.
///
/// `text` is the source between the quotes, so an escaped quote is still
/// written `''`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Pattern {
    pub text: String,
}

impl Pattern {
    pub fn new(text: impl Into<String>) -> Self {
        Pattern { text: text.into() }
    }

    /// The literal value, with `''` folded to `'`.
    pub fn unescaped(&self) -> String {
        self.text.replace("''", "'")
    }

    /// Compiles the pattern into an anchored regex.
    ///
    /// `%` matches any run of characters and `_` matches exactly one. All
    /// other characters match themselves.
    ///
    /// ```
    /// use qp8db::Pattern;
    ///
    /// let re = Pattern::new("Sm_th%").to_regex().unwrap();
    /// assert!(re.is_match("Smith"));
    /// assert!(re.is_match("Smythe"));
    /// assert!(!re.is_match("Smiith"));
    /// ```
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        let mut expr = String::from("^");
        let mut buf = [0; 4];
        for c in self.unescaped().chars() {
            match c {
                '%' => expr.push_str(".*"),
                '_' => expr.push('.'),
                c => expr.push_str(&regex::escape(c.encode_utf8(&mut buf))),
            }
        }
        expr.push('$');

        RegexBuilder::new(&expr).dot_matches_new_line(true).build()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.text)
    }
}
