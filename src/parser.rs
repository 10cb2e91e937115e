use std::mem;

use log::debug;
use thiserror::Error;

use crate::{
    ast::{Attribute, CondList, Condition, FromList, Pattern, Query, Relation, SelList, Token},
    lexer::Lexer,
    scanner::Position,
};

/// Errors raised while parsing a query.
///
/// Parsing stops at the first error; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A required token is missing or a stray one is present
    #[error("expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: Position,
    },

    /// A select, from, or condition list with no entries
    #[error("empty {list} at {position}")]
    EmptyList {
        list: &'static str,
        position: Position,
    },

    /// A quoted literal cut off by a newline or the end of input
    #[error("unterminated string literal at {position}")]
    UnterminatedString { position: Position },

    /// Input ended before the `)` closing a sub-query
    #[error("unterminated sub-query opened at {position}")]
    UnterminatedSubquery { position: Position },

    /// Groups and sub-queries nested past [`MAX_DEPTH`]
    #[error("nesting deeper than {MAX_DEPTH} levels at {position}")]
    TooDeep { position: Position },
}

impl SyntaxError {
    pub fn position(&self) -> Position {
        match self {
            SyntaxError::UnexpectedToken { position, .. }
            | SyntaxError::EmptyList { position, .. }
            | SyntaxError::UnterminatedString { position }
            | SyntaxError::UnterminatedSubquery { position }
            | SyntaxError::TooDeep { position } => *position,
        }
    }
}

/// Limit on nested condition groups and sub-queries, counted together.
pub const MAX_DEPTH: usize = 256;

/// Parses a complete statement from raw input.
///
/// ```
/// let query = qp8db::parse("SELECT a, b FROM r WHERE a = b;").unwrap();
/// assert_eq!(query.select.attributes.len(), 2);
/// ```
pub fn parse<B: AsRef<[u8]> + ?Sized>(input: &B) -> Result<Query, SyntaxError> {
    Parser::new(Lexer::new(input))?.parse_query()
}

/// Recursive-descent parser with one token of lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    current_position: Position,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, SyntaxError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_position();
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_position();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), SyntaxError> {
        if !self.check(&expected) {
            return Err(self.unexpected(description));
        }
        self.advance()
    }

    fn unexpected(&self, expected: &'static str) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            expected,
            found: self.current_token.to_string(),
            position: self.current_position,
        }
    }

    /// Tokens that can legally follow a list, so seeing one where the first
    /// entry belongs means the list is empty.
    fn at_list_end(&self) -> bool {
        matches!(
            self.current_token,
            Token::From | Token::Where | Token::Semicolon | Token::RParen | Token::Eof
        )
    }

    /// Opens a group or sub-query at the current token.
    fn enter(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::TooDeep {
                position: self.current_position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn empty_list(&self, list: &'static str) -> SyntaxError {
        SyntaxError::EmptyList {
            list,
            position: self.current_position,
        }
    }

    /// Parses a whole statement: a query, its `;` if required, and the end of
    /// input.
    pub fn parse_query(&mut self) -> Result<Query, SyntaxError> {
        debug!("parsing query at {}", self.current_position);
        let query = self.parse_select()?;

        if query.where_clause.is_some() {
            self.expect(Token::Semicolon, "`;` after WHERE clause")?;
        } else if self.check(&Token::Semicolon) {
            self.advance()?;
        }
        self.expect(Token::Eof, "end of input")?;

        debug!("parsed query: {}", query);
        Ok(query)
    }

    /// SELECT selList FROM fromList [WHERE condList], without a terminator.
    fn parse_select(&mut self) -> Result<Query, SyntaxError> {
        self.expect(Token::Select, "SELECT")?;
        let select = self.parse_sel_list()?;

        self.expect(Token::From, "FROM")?;
        let from = self.parse_from_list()?;

        let where_clause = if self.check(&Token::Where) {
            self.advance()?;
            Some(self.parse_cond_list()?)
        } else {
            None
        };

        Ok(Query {
            select,
            from,
            where_clause,
        })
    }

    fn parse_sel_list(&mut self) -> Result<SelList, SyntaxError> {
        if self.at_list_end() {
            return Err(self.empty_list("select list"));
        }

        let mut attributes = vec![self.parse_attribute()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            attributes.push(self.parse_attribute()?);
        }
        Ok(SelList { attributes })
    }

    fn parse_from_list(&mut self) -> Result<FromList, SyntaxError> {
        if self.at_list_end() {
            return Err(self.empty_list("from list"));
        }

        let mut relations = vec![self.parse_relation()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            relations.push(self.parse_relation()?);
        }
        Ok(FromList { relations })
    }

    fn parse_cond_list(&mut self) -> Result<CondList, SyntaxError> {
        if self.at_list_end() {
            return Err(self.empty_list("condition list"));
        }

        let mut conditions = vec![self.parse_condition()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            conditions.push(self.parse_condition()?);
        }
        Ok(CondList { conditions })
    }

    /// term (AND term)*, folded to the left.
    fn parse_condition(&mut self) -> Result<Condition, SyntaxError> {
        let mut left = self.parse_condition_term()?;

        while self.check(&Token::And) {
            self.advance()?;
            let right = self.parse_condition_term()?;
            left = Condition::and(left, right);
        }
        Ok(left)
    }

    fn parse_condition_term(&mut self) -> Result<Condition, SyntaxError> {
        if self.check(&Token::LParen) {
            self.enter()?;
            self.advance()?;
            let condition = self.parse_condition()?;
            self.expect(Token::RParen, "`)` closing condition")?;
            self.leave();
            return Ok(condition);
        }

        let attribute = self.parse_attribute()?;

        // The token after the attribute picks the form.
        match self.current_token {
            Token::Equals => {
                self.advance()?;
                let right = self.parse_attribute()?;
                Ok(Condition::equals(attribute, right))
            }
            Token::In => {
                self.advance()?;
                let query = self.parse_subquery()?;
                Ok(Condition::is_in(attribute, query))
            }
            Token::Like => {
                self.advance()?;
                let pattern = self.parse_pattern()?;
                Ok(Condition::like(attribute, pattern))
            }
            _ => Err(self.unexpected("`=`, IN or LIKE after attribute")),
        }
    }

    fn parse_subquery(&mut self) -> Result<Query, SyntaxError> {
        let opened_at = self.current_position;
        if !self.check(&Token::LParen) {
            return Err(self.unexpected("`(` before sub-query"));
        }
        self.enter()?;
        self.advance()?;

        let query = self.parse_select()?;

        match self.current_token {
            Token::RParen => {
                self.advance()?;
                self.leave();
                Ok(query)
            }
            Token::Semicolon | Token::Eof => Err(SyntaxError::UnterminatedSubquery {
                position: opened_at,
            }),
            _ => Err(self.unexpected("`)` closing sub-query")),
        }
    }

    fn parse_identifier(&mut self, expected: &'static str) -> Result<String, SyntaxError> {
        if let Token::Identifier(name) = &mut self.current_token {
            let name = mem::take(name);
            self.advance()?;
            Ok(name)
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// identifier ("." identifier)*, kept as written.
    fn parse_attribute(&mut self) -> Result<Attribute, SyntaxError> {
        let mut name = self.parse_identifier("attribute")?;

        while self.check(&Token::Dot) {
            self.advance()?;
            name.push('.');
            name.push_str(&self.parse_identifier("attribute name after `.`")?);
        }
        Ok(Attribute::new(name))
    }

    fn parse_relation(&mut self) -> Result<Relation, SyntaxError> {
        self.parse_identifier("relation").map(Relation::new)
    }

    fn parse_pattern(&mut self) -> Result<Pattern, SyntaxError> {
        if let Token::String(text) = &mut self.current_token {
            let text = mem::take(text);
            self.advance()?;
            Ok(Pattern::new(text))
        } else {
            Err(self.unexpected("quoted pattern after LIKE"))
        }
    }
}
