use std::fmt;

/// Grammar token produced by the [`Lexer`](crate::lexer::Lexer).
///
/// Keywords are recognised without regard to case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Keywords
    /// Starts a query or sub-query
    ///
    /// # Examples
    /// ```text
    /// SELECT a, b FROM r
    /// select a from r
    /// ```
    Select,

    /// Introduces the relation list
    From,

    /// Introduces the condition list
    ///
    /// # Examples
    /// ```text
    /// SELECT a FROM r WHERE a = b;
    /// ```
    Where,

    /// Explicit conjunction inside a single condition
    ///
    /// # Examples
    /// ```text
    /// a = b AND c LIKE 'x%'
    /// ```
    And,

    /// Set membership against a sub-query
    ///
    /// # Examples
    /// ```text
    /// a IN (SELECT a FROM s)
    /// ```
    In,

    /// Pattern match against a quoted pattern
    ///
    /// # Examples
    /// ```text
    /// name LIKE 'Sm_th%'
    /// ```
    Like,

    // Terminals
    /// Attribute or relation name, kept as written
    ///
    /// # Examples
    /// ```text
    /// a
    /// employees
    /// r2
    /// ```
    Identifier(String),

    /// Quoted literal, without its surrounding quotes
    ///
    /// Doubled quotes are left in place: `'it''s'` becomes `it''s`.
    String(String),

    // Delimiters
    /// `,`
    Comma,

    /// `.` between a relation and an attribute
    Dot,

    /// `(`
    LParen,

    /// `)`
    RParen,

    /// `=`
    Equals,

    /// One of `+ - * /`. Scanned but not used by the grammar.
    Operator(char),

    /// Statement terminator. Reported once, right before [`Token::Eof`].
    Semicolon,

    /// End of input
    Eof,
}

impl Token {
    /// Maps a text run to its keyword, if it is one.
    pub fn keyword(text: &str) -> Option<Token> {
        const KEYWORDS: [(&str, Token); 6] = [
            ("SELECT", Token::Select),
            ("FROM", Token::From),
            ("WHERE", Token::Where),
            ("AND", Token::And),
            ("IN", Token::In),
            ("LIKE", Token::Like),
        ];

        KEYWORDS
            .into_iter()
            .find(|(word, _)| word.eq_ignore_ascii_case(text))
            .map(|(_, token)| token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Select => write!(f, "SELECT"),
            Token::From => write!(f, "FROM"),
            Token::Where => write!(f, "WHERE"),
            Token::And => write!(f, "AND"),
            Token::In => write!(f, "IN"),
            Token::Like => write!(f, "LIKE"),
            Token::Identifier(name) => write!(f, "identifier `{}`", name),
            Token::String(s) => write!(f, "string '{}'", s),
            Token::Comma => write!(f, "`,`"),
            Token::Dot => write!(f, "`.`"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::Equals => write!(f, "`=`"),
            Token::Operator(c) => write!(f, "`{}`", c),
            Token::Semicolon => write!(f, "`;`"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
