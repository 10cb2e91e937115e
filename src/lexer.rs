use crate::{
    ast::Token,
    parser::SyntaxError,
    scanner::{Chunk, ChunkKind, Position, Scanner},
};

/// Turns scanner chunks into grammar tokens.
///
/// Whitespace and newlines are dropped. If the scanner stopped on `;` a single
/// [`Token::Semicolon`] is produced before [`Token::Eof`].
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    position: Position,
    reported_terminator: bool,
}

impl<'a> Lexer<'a> {
    pub fn new<B: AsRef<[u8]> + ?Sized>(input: &'a B) -> Self {
        Lexer {
            scanner: Scanner::new(input.as_ref()),
            position: Position::default(),
            reported_terminator: false,
        }
    }

    /// Position of the token most recently returned by [`Lexer::next_token`].
    pub fn token_position(&self) -> Position {
        self.position
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        loop {
            let Some(chunk) = self.scanner.next() else {
                self.position = self.scanner.position();
                if self.scanner.terminated() && !self.reported_terminator {
                    self.reported_terminator = true;
                    return Ok(Token::Semicolon);
                }
                return Ok(Token::Eof);
            };

            self.position = chunk.position;
            match chunk.kind {
                ChunkKind::Whitespace => continue,
                ChunkKind::Delimiter if chunk.is_newline() => continue,
                ChunkKind::Delimiter => return Ok(delimiter(chunk.bytes[0])),
                ChunkKind::QuotedString => return read_string(&chunk),
                ChunkKind::Text => {
                    let text = chunk.text();
                    return Ok(Token::keyword(&text)
                        .unwrap_or_else(|| Token::Identifier(text.into_owned())));
                }
            }
        }
    }
}

fn delimiter(b: u8) -> Token {
    match b {
        b',' => Token::Comma,
        b'.' => Token::Dot,
        b'(' => Token::LParen,
        b')' => Token::RParen,
        b'=' => Token::Equals,
        other => Token::Operator(char::from(other)),
    }
}

fn read_string(chunk: &Chunk<'_>) -> Result<Token, SyntaxError> {
    let bytes = chunk.bytes;
    if !is_closed(bytes) {
        return Err(SyntaxError::UnterminatedString {
            position: chunk.position,
        });
    }
    let inner = &bytes[1..bytes.len() - 1];
    Ok(Token::String(String::from_utf8_lossy(inner).into_owned()))
}

/// Whether a quoted chunk ends on its own closing quote rather than on a
/// newline or the end of input.
fn is_closed(bytes: &[u8]) -> bool {
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] != b'\'' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'\'') {
            i += 2;
            continue;
        }
        return i == bytes.len() - 1;
    }
    false
}
