//! Token types for the access-path lexer

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum TokenType {
    // Literals
    StringLiteral,
    IntegerLiteral,
    DecimalLiteral,

    Identifier,

    // Keywords
    True,
    False,
    Null,

    // Operators
    Arrow,        // =>
    Dot,          // .
    DoubleColon,  // ::
    OpenBracket,  // [
    CloseBracket, // ]
    Plus,         // +
    Minus,        // -
    Multiply,     // *
    Divide,       // /
    Percent,      // %

    // Delimiters
    OpenParen,  // (
    CloseParen, // )
    Comma,      // ,

    Eof,

    Error,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        value: impl Into<String>,
        position: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            token_type,
            value: value.into(),
            position,
            line,
            column,
        }
    }

    pub fn eof(position: usize, line: usize, column: usize) -> Self {
        Self::new(TokenType::Eof, String::new(), position, line, column)
    }

    pub fn error(message: String, position: usize, line: usize, column: usize) -> Self {
        Self::new(TokenType::Error, message, position, line, column)
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}
