use chisel_lenient_json::errors::{Details, Stage};
use chisel_lenient_json::scanner::{scan, Scanner};
use chisel_lenient_json::tokens::TokenKind;
use chisel_lenient_json::DialectOptions;

#[test]
fn should_handle_empty_input() {
    let tokens = scan("", DialectOptions::default()).unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn should_scan_a_document() {
    let tokens = scan(r#"{"a": [1, true, null]}"#, DialectOptions::default()).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::StartObject,
            TokenKind::Str,
            TokenKind::Colon,
            TokenKind::StartArray,
            TokenKind::Num,
            TokenKind::Comma,
            TokenKind::Bool,
            TokenKind::Comma,
            TokenKind::Null,
            TokenKind::EndArray,
            TokenKind::EndObject,
        ]
    );
    assert_eq!(tokens[1].lexeme, r#""a""#);
}

#[test]
fn should_scan_every_extension() {
    let source = "{ /* block */ key: 'value', // line\n list: [1,], }";
    let tokens = scan(source, DialectOptions::lenient()).unwrap();
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(
        lexemes,
        vec!["{", "key", ":", "'value'", ",", "list", ":", "[", "1", ",", "]", ",", "}"]
    );
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::Str);
}

#[test]
fn should_report_unexpected_characters_with_coords() {
    let err = scan("{\"bad\": @}", DialectOptions::default()).unwrap_err();
    assert_eq!(err.stage, Stage::Scanner);
    assert_eq!(err.details, Details::UnexpectedCharacter('@'));
    let coords = err.coords.unwrap();
    assert_eq!(coords.absolute, 8);
    assert_eq!(coords.column, 9);
    assert!(err.to_string().contains("Unexpected token @"));
}

#[test]
fn should_iterate_lazily() {
    let scanner = Scanner::new("[1, 2, 3]", DialectOptions::default());
    let numbers = scanner
        .filter_map(|t| t.ok())
        .filter(|t| t.kind == TokenKind::Num)
        .count();
    assert_eq!(numbers, 3);
}
