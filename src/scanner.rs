//! Byte-level scanner.
//!
//! Splits a raw buffer into chunks without interpreting them. A chunk is one
//! of four things:
//!
//! - a single delimiter byte (`. , ( ) ; = + - * /` or a newline)
//! - a quoted string, from `'` up to the closing `'` (`''` is an escaped quote)
//! - a run of whitespace, where invalid UTF-8 counts as whitespace
//! - a run of text, which is everything else
//!
//! A `;` at a chunk boundary ends the input. Nothing after it is scanned.
//!
//! ```
//! use qp8db::scanner::{scan, ChunkKind};
//!
//! let chunks = scan(b"SELECT a;ignored");
//! let kinds: Vec<_> = chunks.iter().map(|c| c.kind).collect();
//! assert_eq!(kinds, [ChunkKind::Text, ChunkKind::Whitespace, ChunkKind::Text]);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::iter::FusedIterator;

use log::trace;
use serde::Serialize;

const DELIMITERS: &[u8] = b".,();=+-*/\n";

fn is_delimiter(b: u8) -> bool {
    DELIMITERS.contains(&b)
}

/// Decodes the code point at the start of `b`.
///
/// Returns `None` with a width of one for malformed sequences. An encoded
/// U+FFFD is reported as `None` too, with its real width.
fn decode(b: &[u8]) -> (Option<char>, usize) {
    let width = match b[0] {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return (None, 1),
    };
    if b.len() < width {
        return (None, 1);
    }
    match std::str::from_utf8(&b[..width]) {
        Ok(s) => (
            s.chars().next().filter(|&c| c != char::REPLACEMENT_CHARACTER),
            width,
        ),
        Err(_) => (None, 1),
    }
}

fn is_space(c: Option<char>) -> bool {
    c.is_none_or(char::is_whitespace)
}

fn split(b: &[u8], length: usize) -> (Option<&[u8]>, Option<&[u8]>) {
    let (token, rest) = b.split_at(length);
    (Some(token), (!rest.is_empty()).then_some(rest))
}

/// Returns the next chunk and the remainder of the buffer.
///
/// Both the empty buffer and a leading `;` are end of input and return
/// `(None, None)`. When the chunk uses up the buffer the remainder is `None`,
/// never an empty slice.
pub fn next(b: &[u8]) -> (Option<&[u8]>, Option<&[u8]>) {
    if b.is_empty() || b[0] == b';' {
        return (None, None);
    }

    if is_delimiter(b[0]) {
        return split(b, 1);
    }

    let (first, width) = decode(b);
    let mut length = width;

    if is_space(first) {
        while length < b.len() && b[length] != b'\n' {
            let (c, w) = decode(&b[length..]);
            if !is_space(c) {
                break;
            }
            length += w;
        }
    } else if first == Some('\'') {
        while length < b.len() && b[length] != b'\n' {
            if b[length] != b'\'' {
                length += decode(&b[length..]).1;
                continue;
            }
            length += 1; // closing quote
            if b.get(length) == Some(&b'\'') {
                length += 1;
                continue;
            }
            break;
        }
    } else {
        while length < b.len() && !is_delimiter(b[length]) {
            let (c, w) = decode(&b[length..]);
            if is_space(c) {
                break;
            }
            length += w;
        }
    }

    split(b, length)
}

/// Classification of a scanned chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// A single structural byte, including newline
    Delimiter,
    /// A `'`-quoted run, possibly missing its closing quote
    QuotedString,
    /// Whitespace and malformed UTF-8
    Whitespace,
    /// Anything else
    Text,
}

impl ChunkKind {
    /// Classifies a chunk returned by [`next`]. Only the first code point
    /// matters, since `next` never mixes kinds.
    pub fn of(chunk: &[u8]) -> Self {
        match chunk.first() {
            Some(&b) if chunk.len() == 1 && is_delimiter(b) => ChunkKind::Delimiter,
            Some(b'\'') => ChunkKind::QuotedString,
            Some(_) if is_space(decode(chunk).0) => ChunkKind::Whitespace,
            _ => ChunkKind::Text,
        }
    }
}

/// Location in the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Byte offset from the start of the buffer
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in bytes
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    fn advance(&mut self, chunk: &[u8]) {
        self.offset += chunk.len();
        if chunk == b"\n" {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += chunk.len();
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A classified span of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub kind: ChunkKind,
    pub bytes: &'a [u8],
    pub position: Position,
}

impl<'a> Chunk<'a> {
    pub fn is_newline(&self) -> bool {
        self.bytes == b"\n"
    }

    /// The chunk as text, with malformed sequences replaced.
    pub fn text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes)
    }
}

/// Lazy chunk sequence over a buffer.
///
/// Calls [`next`] until it reports end of input. Once exhausted it stays
/// exhausted; scanning again needs a new `Scanner`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    remaining: Option<&'a [u8]>,
    position: Position,
    terminated: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Scanner {
            remaining: Some(input),
            position: Position::default(),
            terminated: false,
        }
    }

    /// Position of the next unread byte. After the scanner is exhausted this
    /// is the end of input, or the `;` that stopped it.
    pub fn position(&self) -> Position {
        self.position
    }

    /// True once scanning has stopped on a `;` rather than the end of the
    /// buffer.
    pub fn terminated(&self) -> bool {
        self.terminated
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let buffer = self.remaining?;

        match self::next(buffer) {
            (Some(bytes), rest) => {
                let chunk = Chunk {
                    kind: ChunkKind::of(bytes),
                    bytes,
                    position: self.position,
                };
                trace!("token({:?}) at {}", chunk.text(), chunk.position);
                self.position.advance(bytes);
                self.remaining = rest;
                Some(chunk)
            }
            (None, _) => {
                self.terminated = buffer.first() == Some(&b';');
                self.remaining = None;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(b) => (0, Some(b.len())),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Scanner<'_> {}

/// Scans the whole buffer, stopping at the first chunk-boundary `;`.
pub fn scan(input: &[u8]) -> Vec<Chunk<'_>> {
    Scanner::new(input).collect()
}

#[test]
fn test_next_splits_text_and_spaces() {
    assert_eq!(next(b"SELECT a"), (Some(&b"SELECT"[..]), Some(&b" a"[..])));
    assert_eq!(next(b" a"), (Some(&b" "[..]), Some(&b"a"[..])));
    assert_eq!(next(b"a"), (Some(&b"a"[..]), None));
    assert_eq!(next(b""), (None, None));
    assert_eq!(next(b";rest"), (None, None));
}

#[test]
fn test_invalid_bytes_join_space_run() {
    let input = b" \xff\xfe \tx";
    assert_eq!(next(input), (Some(&input[..5]), Some(&b"x"[..])));
    assert_eq!(ChunkKind::of(&input[..5]), ChunkKind::Whitespace);

    let lone = b"\x80abc";
    assert_eq!(next(lone), (Some(&b"\x80"[..]), Some(&b"abc"[..])));
}

#[test]
fn test_replacement_character_counts_as_space() {
    let input = "\u{fffd}a".as_bytes();
    assert_eq!(next(input), (Some(&input[..3]), Some(&b"a"[..])));
}

#[test]
fn test_quoted_string_stops_at_newline() {
    assert_eq!(next(b"'abc\ndef'"), (Some(&b"'abc"[..]), Some(&b"\ndef'"[..])));
    assert_eq!(next(b"'a;b' x"), (Some(&b"'a;b'"[..]), Some(&b" x"[..])));
    assert_eq!(next(b"''''"), (Some(&b"''''"[..]), None));
}

#[test]
fn test_scanner_tracks_lines() {
    let chunks = scan(b"a\n  b");
    assert_eq!(chunks.len(), 4);
    assert_eq!(chunks[3].bytes, b"b");
    assert_eq!(chunks[3].position.line, 2);
    assert_eq!(chunks[3].position.column, 3);
    assert_eq!(chunks[3].position.offset, 4);
}
