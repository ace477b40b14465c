use rstest::rstest;

use jsonlint::{
    tokenize, validate, validate_str, ErrorClass, ParseError, ParserOptions, Position, Report,
    Spanned, Token, TokenType,
};

fn check(src: &str) -> Result<jsonlint::Value, ParseError> {
    validate_str(src, ParserOptions::default())
}

fn tokens(src: &str) -> Vec<Token> {
    tokenize(src.as_bytes()).expect("in-memory input")
}

#[rstest]
#[case("{}")]
#[case("[]")]
#[case("\"\"")]
#[case("-0")]
#[case("1.23e-10")]
#[case(r#"{"glossary": {"title": "example", "GlossDiv": {"GlossList": [1, 2.5, -3e2, null]}}}"#)]
#[case(r#"["é😀", "\"quoted\"", "back\\slash", "\/"]"#)]
#[case("[\r\n  true,\r\n  false\r\n]\r\n")]
#[case(r#"{"a": {"b": {"c": [[], {}, [{}]]}}}"#)]
#[case("  \t 42 \n")]
fn conforming_documents(#[case] src: &str) {
    assert!(
        tokens(src).iter().all(|t| t.ty() != TokenType::Illegal),
        "{src} lexes cleanly"
    );
    assert!(check(src).is_ok(), "{src}: {:?}", check(src));
}

#[rstest]
#[case("01")]
#[case("[1, 2, 0x1F]")]
#[case(r#"{"a": tru}"#)]
#[case("{\"a\": \"tab\tinside\"}")]
#[case(r#"["\q"]"#)]
#[case("[1, @]")]
#[case("{'a': 1}")]
#[case("[-1.2.3]")]
#[case("[.5]")]
fn illegal_token_is_the_reported_position(#[case] src: &str) {
    let illegal = tokens(src)
        .into_iter()
        .find(|t| t.ty() == TokenType::Illegal)
        .expect("input holds an illegal token");

    let err = check(src).unwrap_err();
    assert_eq!(err.position(), Some(illegal.position()), "{src}: {err}");
}

#[test]
fn empty_object_tokens() {
    let flat: Vec<_> = tokens("{}")
        .iter()
        .map(|t| (t.ty(), t.lexeme().to_string(), t.position()))
        .collect();

    assert_eq!(
        flat,
        [
            (TokenType::LBrace, "{".to_string(), Position::new(1, 1, 1)),
            (TokenType::RBrace, "}".to_string(), Position::new(1, 2, 2)),
            (TokenType::Eof, "EOF".to_string(), Position::new(1, 3, 3)),
        ]
    );

    assert_eq!(check("{}").unwrap(), jsonlint::Value::Object(Default::default()));
}

#[rstest]
#[case("1.23e-10", TokenType::Num)]
#[case("01", TokenType::Illegal)]
#[case("-1.2.3", TokenType::Illegal)]
#[case("e10", TokenType::Illegal)]
#[case("\"\"", TokenType::Str)]
fn single_tokens(#[case] src: &str, #[case] ty: TokenType) {
    let all = tokens(src);
    assert_eq!(all.len(), 2, "{all:?}");
    assert_eq!(all[0].ty(), ty);
    assert!(all[1].is_eof());
}

#[test]
fn empty_string_lexeme() {
    assert_eq!(tokens("\"\"")[0].lexeme(), "");
}

#[rstest]
#[case(r#"{"a":1,}"#, 7)]
#[case("[1,]", 3)]
fn trailing_commas(#[case] src: &str, #[case] column: usize) {
    let err = check(src).unwrap_err();
    assert!(matches!(err, ParseError::TrailingComma { .. }), "{err:?}");
    assert_eq!(err.position(), Some(Position::single_char(1, column)));
}

#[test]
fn second_root_value() {
    let err = check("1 2").unwrap_err();
    assert_eq!(err.class(), ErrorClass::TrailingContent);
    assert_eq!(err.position(), Some(Position::single_char(1, 3)));
}

#[test]
fn raw_newline_keeps_the_string_whole() {
    let src = "[\"a\nb\"]";
    let types: Vec<_> = tokens(src).iter().map(Token::ty).collect();
    assert_eq!(
        types,
        [
            TokenType::LBracket,
            TokenType::Illegal,
            TokenType::RBracket,
            TokenType::Eof
        ]
    );

    let err = check(src).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Lexical, "{err}");
    assert_eq!(err.position(), Some(Position::new(1, 2, 3)));
}

#[test]
fn tokenizing_is_deterministic() {
    let src = "{\"menu\": {\"id\": \"file\", \"items\": [1, 2e5, -0.5, \"x\", tru]}}";
    assert_eq!(tokens(src), tokens(src));
}

#[test]
fn reports_from_files() {
    let path = std::env::temp_dir().join(format!("jsonlint-{}.json", std::process::id()));
    std::fs::write(&path, "{\n  \"a\": [1, 2,]\n}\n").unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let err = validate(file, ParserOptions::default()).unwrap_err();
    let report = Report::new(&path, err).to_string();
    std::fs::remove_file(&path).unwrap();

    assert!(
        report.ends_with(".json:2:13: trailing comma before RBRACKET"),
        "{report}"
    );
}
