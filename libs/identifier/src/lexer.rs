//! Access-path lexer
//!
//! Splits lambda source such as `x => x.Items[i + 1].Name` into tokens.

use crate::error::{Error, Result};
use crate::token::{Token, TokenType};

pub struct Lexer {
    position: usize,
    line: usize,
    column: usize,
    chars: Vec<char>,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            position: 0,
            line: 1,
            column: 1,
            chars,
            current_char,
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            match token.token_type {
                TokenType::Error => {
                    return Err(Error::ParseError(format!(
                        "{} at line {}, column {}",
                        token.value, token.line, token.column
                    )))
                }
                TokenType::Eof => {
                    tokens.push(token);
                    return Ok(tokens);
                }
                _ => tokens.push(token),
            }
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.current_char {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += 1;
        self.current_char = self.chars.get(self.position).copied();
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char, Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while matches!(self.current_char, Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        self.chars[start..self.position].iter().collect()
    }

    /// Read a number; returns the text and whether it has a fractional part.
    fn read_number(&mut self) -> (String, bool) {
        let start = self.position;
        let mut is_decimal = false;

        while matches!(self.current_char, Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        // `1.Foo` is not a decimal; only consume the dot when digits follow
        if self.current_char == Some('.') && matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            is_decimal = true;
            self.advance();
            while matches!(self.current_char, Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }

        (self.chars[start..self.position].iter().collect(), is_decimal)
    }

    fn read_string(&mut self, quote: char) -> std::result::Result<String, &'static str> {
        self.advance(); // opening quote
        let mut value = String::new();

        while let Some(c) = self.current_char {
            if c == quote {
                self.advance();
                return Ok(value);
            }
            if c == '\\' {
                self.advance();
                let escaped = self.current_char.ok_or("Incomplete escape sequence")?;
                value.push(match escaped {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    '0' => '\0',
                    other => other,
                });
            } else {
                value.push(c);
            }
            self.advance();
        }

        Err("Unterminated string literal")
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let position = self.position;
        let line = self.line;
        let column = self.column;

        let Some(c) = self.current_char else {
            return Token::eof(position, line, column);
        };

        let single = |token_type: TokenType| Token::new(token_type, c, position, line, column);

        match c {
            '.' => {
                self.advance();
                single(TokenType::Dot)
            }
            '[' => {
                self.advance();
                single(TokenType::OpenBracket)
            }
            ']' => {
                self.advance();
                single(TokenType::CloseBracket)
            }
            '(' => {
                self.advance();
                single(TokenType::OpenParen)
            }
            ')' => {
                self.advance();
                single(TokenType::CloseParen)
            }
            ',' => {
                self.advance();
                single(TokenType::Comma)
            }
            '+' => {
                self.advance();
                single(TokenType::Plus)
            }
            '-' => {
                self.advance();
                single(TokenType::Minus)
            }
            '*' => {
                self.advance();
                single(TokenType::Multiply)
            }
            '/' => {
                self.advance();
                single(TokenType::Divide)
            }
            '%' => {
                self.advance();
                single(TokenType::Percent)
            }
            '=' if self.peek() == Some('>') => {
                self.advance();
                self.advance();
                Token::new(TokenType::Arrow, "=>", position, line, column)
            }
            ':' if self.peek() == Some(':') => {
                self.advance();
                self.advance();
                Token::new(TokenType::DoubleColon, "::", position, line, column)
            }
            '\'' | '"' => match self.read_string(c) {
                Ok(value) => Token::new(TokenType::StringLiteral, value, position, line, column),
                Err(message) => Token::error(message.to_string(), position, line, column),
            },
            c if c.is_ascii_digit() => {
                let (value, is_decimal) = self.read_number();
                let token_type = if is_decimal {
                    TokenType::DecimalLiteral
                } else {
                    TokenType::IntegerLiteral
                };
                Token::new(token_type, value, position, line, column)
            }
            c if c.is_alphabetic() || c == '_' => {
                let ident = self.read_identifier();
                let token_type = match ident.as_str() {
                    "true" => TokenType::True,
                    "false" => TokenType::False,
                    "null" => TokenType::Null,
                    _ => TokenType::Identifier,
                };
                Token::new(token_type, ident, position, line, column)
            }
            other => Token::error(
                format!("Unexpected character '{}'", other),
                position,
                line,
                column,
            ),
        }
    }
}
