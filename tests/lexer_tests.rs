// tests/lexer_tests.rs

use qp8db::ast::Token;
use qp8db::lexer::Lexer;
use qp8db::SyntaxError;

fn tokens(input: &[u8]) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("SELECT", Token::Select),
        ("FROM", Token::From),
        ("WHERE", Token::Where),
        ("AND", Token::And),
        ("IN", Token::In),
        ("LIKE", Token::Like),
        ("select", Token::Select),
        ("From", Token::From),
        ("wHeRe", Token::Where),
        ("like", Token::Like),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_keywords_vs_identifiers() {
    let test_cases = vec!["selection", "fromage", "android", "inner", "likes", "_in"];

    for input in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            ident(input),
            "Failed for input: {}",
            input
        );
    }
}

// ============================================================================
// Delimiters
// ============================================================================

#[test]
fn test_delimiters() {
    assert_eq!(
        tokens(b", . ( ) = + - * /"),
        vec![
            Token::Comma,
            Token::Dot,
            Token::LParen,
            Token::RParen,
            Token::Equals,
            Token::Operator('+'),
            Token::Operator('-'),
            Token::Operator('*'),
            Token::Operator('/'),
        ]
    );
}

#[test]
fn test_whitespace_and_newlines_are_skipped() {
    assert_eq!(
        tokens(b"SELECT\n\ta ,\r\n b"),
        vec![Token::Select, ident("a"), Token::Comma, ident("b")]
    );
}

#[test]
fn test_invalid_bytes_separate_identifiers() {
    assert_eq!(tokens(b"a\xffb"), vec![ident("a"), ident("b")]);
}

#[test]
fn test_qualified_name() {
    assert_eq!(
        tokens(b"r.a=s.b"),
        vec![
            ident("r"),
            Token::Dot,
            ident("a"),
            Token::Equals,
            ident("s"),
            Token::Dot,
            ident("b"),
        ]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_keeps_escaped_quotes() {
    assert_eq!(
        tokens(b"'it''s fine'"),
        vec![Token::String("it''s fine".to_string())]
    );
    assert_eq!(tokens(b"''"), vec![Token::String(String::new())]);
}

#[test]
fn test_string_with_semicolon() {
    assert_eq!(
        tokens(b"'a;b'"),
        vec![Token::String("a;b".to_string())]
    );
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("x 'abc\n'");
    assert_eq!(lexer.next_token().unwrap(), ident("x"));

    match lexer.next_token() {
        Err(SyntaxError::UnterminatedString { position }) => {
            assert_eq!(position.offset, 2);
            assert_eq!(position.column, 3);
        }
        other => panic!("Expected unterminated string, got {:?}", other),
    }
}

#[test]
fn test_unterminated_after_escape() {
    let mut lexer = Lexer::new("'ab''");
    assert!(matches!(
        lexer.next_token(),
        Err(SyntaxError::UnterminatedString { .. })
    ));
}

// ============================================================================
// End of Input
// ============================================================================

#[test]
fn test_semicolon_reported_once() {
    let mut lexer = Lexer::new("a; b");
    assert_eq!(lexer.next_token().unwrap(), ident("a"));
    assert_eq!(lexer.next_token().unwrap(), Token::Semicolon);
    assert_eq!(lexer.token_position().offset, 1);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_no_semicolon_without_terminator() {
    assert_eq!(
        tokens(b"SELECT a FROM r"),
        vec![Token::Select, ident("a"), Token::From, ident("r")]
    );
}

#[test]
fn test_token_positions() {
    let mut lexer = Lexer::new("SELECT\n  a");
    lexer.next_token().unwrap();
    assert_eq!(lexer.next_token().unwrap(), ident("a"));

    let position = lexer.token_position();
    assert_eq!(position.line, 2);
    assert_eq!(position.column, 3);
    assert_eq!(position.offset, 9);
}
