// tests/scanner_tests.rs

use qp8db::scanner::{next, scan, ChunkKind, Scanner};

fn texts(input: &[u8]) -> Vec<Vec<u8>> {
    scan(input).iter().map(|c| c.bytes.to_vec()).collect()
}

fn concat(input: &[u8]) -> Vec<u8> {
    scan(input).iter().flat_map(|c| c.bytes.iter().copied()).collect()
}

// ============================================================================
// Chunk Boundaries
// ============================================================================

#[test]
fn test_query_without_terminator() {
    let mut scanner = Scanner::new(b"SELECT a FROM r");
    let chunks: Vec<_> = scanner.by_ref().map(|c| c.bytes).collect();

    let expected: [&[u8]; 7] = [b"SELECT", b" ", b"a", b" ", b"FROM", b" ", b"r"];
    assert_eq!(chunks, expected);
    assert!(!scanner.terminated());
    assert_eq!(scanner.position().offset, 15);
    assert!(scanner.next().is_none());
}

#[test]
fn test_delimiters_are_standalone() {
    let chunks = scan(b"a.b,c(d)e=f+g-h*i/j\nk");
    let delimiters: Vec<_> = chunks
        .iter()
        .filter(|c| c.kind == ChunkKind::Delimiter)
        .map(|c| c.bytes)
        .collect();

    let expected: [&[u8]; 10] = [b".", b",", b"(", b")", b"=", b"+", b"-", b"*", b"/", b"\n"];
    assert_eq!(delimiters, expected);
    assert_eq!(chunks.len(), 21);
    assert!(chunks.iter().all(|c| c.kind != ChunkKind::Whitespace));
}

#[test]
fn test_space_run_stops_at_newline() {
    assert_eq!(
        texts(b"  \t\n  x"),
        vec![b"  \t".to_vec(), b"\n".to_vec(), b"  ".to_vec(), b"x".to_vec()]
    );
}

#[test]
fn test_multibyte_text() {
    assert_eq!(
        texts("héllo wörld".as_bytes()),
        vec![
            "héllo".as_bytes().to_vec(),
            b" ".to_vec(),
            "wörld".as_bytes().to_vec()
        ]
    );
}

#[test]
fn test_unicode_whitespace() {
    let chunks = scan("a\u{a0}\u{3000}b".as_bytes());
    let kinds: Vec<_> = chunks.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ChunkKind::Text, ChunkKind::Whitespace, ChunkKind::Text]
    );
}

#[test]
fn test_apostrophe_inside_text() {
    let chunks = scan(b"it's");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].kind, ChunkKind::Text);
}

// ============================================================================
// Quoted Strings
// ============================================================================

#[test]
fn test_escaped_quote_stays_in_one_chunk() {
    let chunks = scan(b"'it''s fine' x");
    assert_eq!(chunks[0].bytes, b"'it''s fine'");
    assert_eq!(chunks[0].kind, ChunkKind::QuotedString);
    assert_eq!(chunks.len(), 3);
}

#[test]
fn test_unterminated_quote_is_not_an_error() {
    let chunks = scan(b"'abc");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].kind, ChunkKind::QuotedString);

    let chunks = scan(b"'abc\ndef");
    assert_eq!(chunks[0].bytes, b"'abc");
    assert!(chunks[1].is_newline());
}

#[test]
fn test_semicolon_inside_quotes() {
    let chunks = scan(b"'a;b' c");
    assert_eq!(chunks[0].bytes, b"'a;b'");
    assert_eq!(chunks.last().map(|c| c.bytes), Some(&b"c"[..]));
}

// ============================================================================
// End of Input
// ============================================================================

#[test]
fn test_semicolon_truncates() {
    let mut scanner = Scanner::new(b"SELECT a; FROM r");
    let chunks: Vec<_> = scanner.by_ref().map(|c| c.bytes).collect();

    let expected: [&[u8]; 3] = [b"SELECT", b" ", b"a"];
    assert_eq!(chunks, expected);
    assert!(scanner.terminated());
    assert_eq!(scanner.position().offset, 8);
}

#[test]
fn test_empty_buffer_is_done() {
    assert_eq!(next(b""), (None, None));
    assert!(scan(b"").is_empty());
    assert!(scan(b";SELECT").is_empty());
    assert!(Scanner::new(b";").next().is_none());
}

#[test]
fn test_remainder_is_none_when_exhausted() {
    let (token, rest) = next(b"abc");
    assert_eq!(token, Some(&b"abc"[..]));
    assert_eq!(rest, None);

    let (token, rest) = next(b")");
    assert_eq!(token, Some(&b")"[..]));
    assert_eq!(rest, None);
}

// ============================================================================
// Malformed Input
// ============================================================================

#[test]
fn test_chunks_partition_input() {
    let cases: [(&[u8], &[u8]); 9] = [
        (b"SELECT a, b FROM r WHERE a = b", b"SELECT a, b FROM r WHERE a = b"),
        (b"SELECT a FROM r WHERE a = b; trailing", b"SELECT a FROM r WHERE a = b"),
        (b"a 'b;c' ; d", b"a 'b;c' "),
        (b"\xff\xff;\xff", b"\xff\xff"),
        (b"\xe2\x82", b"\xe2\x82"),
        (b"ab\xc3(", b"ab\xc3("),
        (b"x\r\n\x80\xbf y", b"x\r\n\x80\xbf y"),
        (b"''''", b"''''"),
        (b"'unterminated", b"'unterminated"),
    ];

    for (input, expected) in cases {
        assert_eq!(concat(input), expected, "Failed for input: {:?}", input);
    }
}

#[test]
fn test_malformed_bytes_are_spaces() {
    let chunks = scan(b"ab\xc3(");
    let kinds: Vec<_> = chunks.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ChunkKind::Text, ChunkKind::Whitespace, ChunkKind::Delimiter]
    );
}

#[test]
fn test_scanning_always_progresses() {
    // every one- and two-byte buffer terminates within its length
    for a in 0..=255u8 {
        for b in [0x00, b' ', b'\'', b';', b'\n', 0x80, 0xc3, 0xff] {
            let input = [a, b];
            let count = Scanner::new(&input).count();
            assert!(count <= input.len(), "Failed for input: {:?}", input);
            assert!(concat(&input).len() <= input.len());
        }
    }
}

#[test]
fn test_positions() {
    let chunks = scan(b"SELECT a\nFROM r");
    let from = chunks.iter().find(|c| c.bytes == b"FROM").map(|c| c.position);
    let from = from.expect("FROM chunk");
    assert_eq!(from.offset, 9);
    assert_eq!(from.line, 2);
    assert_eq!(from.column, 1);
    assert_eq!(from.to_string(), "line 2, column 1");
}
