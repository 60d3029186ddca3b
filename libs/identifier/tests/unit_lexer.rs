//! Unit tests for the access-path lexer

use pathkey_identifier::lexer::Lexer;
use pathkey_identifier::token::TokenType;

fn token_types(input: &str) -> Vec<TokenType> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.token_type)
        .collect()
}

#[test]
fn test_lambda_tokens() {
    assert_eq!(
        token_types("x => x.Items[0]"),
        vec![
            TokenType::Identifier,
            TokenType::Arrow,
            TokenType::Identifier,
            TokenType::Dot,
            TokenType::Identifier,
            TokenType::OpenBracket,
            TokenType::IntegerLiteral,
            TokenType::CloseBracket,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_static_member_tokens() {
    assert_eq!(
        token_types("App.Config::Default"),
        vec![
            TokenType::Identifier,
            TokenType::Dot,
            TokenType::Identifier,
            TokenType::DoubleColon,
            TokenType::Identifier,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_numbers() {
    let tokens = Lexer::new("1000000 2.5").tokenize().unwrap();
    assert_eq!(tokens[0].token_type, TokenType::IntegerLiteral);
    assert_eq!(tokens[0].value, "1000000");
    assert_eq!(tokens[1].token_type, TokenType::DecimalLiteral);
    assert_eq!(tokens[1].value, "2.5");
}

#[test]
fn test_dot_after_integer_is_not_decimal() {
    assert_eq!(
        token_types("1.Foo"),
        vec![
            TokenType::IntegerLiteral,
            TokenType::Dot,
            TokenType::Identifier,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_string_escapes() {
    let tokens = Lexer::new(r#"'it\'s' "a\"b""#).tokenize().unwrap();
    assert_eq!(tokens[0].token_type, TokenType::StringLiteral);
    assert_eq!(tokens[0].value, "it's");
    assert_eq!(tokens[1].value, "a\"b");
}

#[test]
fn test_keywords() {
    assert_eq!(
        token_types("true false null"),
        vec![
            TokenType::True,
            TokenType::False,
            TokenType::Null,
            TokenType::Eof
        ]
    );
}

#[test]
fn test_positions() {
    let tokens = Lexer::new("x =>\n  x.Name").tokenize().unwrap();
    let name = &tokens[4];
    assert_eq!(name.value, "Name");
    assert_eq!(name.line, 2);
    assert_eq!(name.column, 5);
}

#[test]
fn test_unexpected_character() {
    let err = Lexer::new("x => x # y").tokenize().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error: Unexpected character '#' at line 1, column 8"
    );
}
