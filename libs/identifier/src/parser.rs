//! Access-path parser - turns lambda source text into an [`Expr`] tree
//!
//! Recursive descent over the following grammar (lowest precedence first):
//!
//! ```text
//! lambda         := IDENT "=>" expression | "(" IDENT ")" "=>" expression
//! expression     := additive
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := unary (("*" | "/" | "%") unary)*
//! unary          := "-" unary | "(" type ")" unary | postfix
//! postfix        := primary ("." IDENT ["(" arguments ")"] | "[" expression "]")*
//! primary        := literal | type "::" IDENT | IDENT ["(" arguments ")"] | "(" expression ")"
//! type           := IDENT ("." IDENT)*
//! ```
//!
//! Identifier resolution:
//! - the lambda parameter becomes [`Expr::Parameter`]; any other bare
//!   identifier is a captured [`Expr::Variable`]
//! - `Namespace.Type::Member` is a static member of `Namespace.Type`
//! - `target[<integer literal>]` is an [`Expr::ArrayIndex`]; any other
//!   bracket argument becomes an indexer call (`get_Item`)

use crate::ast::{BinaryOperator, Expr, TypeName, INDEXER_METHOD};
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};
use crate::value::Value;
use rust_decimal::Decimal;
use std::str::FromStr;

const MAX_RECURSION_DEPTH: usize = 200;

/// Parse `param => body` into an [`Expr::Lambda`].
pub fn parse_lambda(source: &str) -> Result<Expr> {
    Parser::new(source)?.parse_lambda()
}

/// Parse a bare expression. `parameter` names the identifier that refers to
/// the lambda input; without one every bare identifier is a captured variable.
pub fn parse_expression(source: &str, parameter: Option<&str>) -> Result<Expr> {
    let mut parser = Parser::new(source)?;
    parser.parameter = parameter.map(str::to_string);
    parser.parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    parameter: Option<String>,
    recursion_depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self> {
        Ok(Self {
            tokens: Lexer::new(source).tokenize()?,
            position: 0,
            parameter: None,
            recursion_depth: 0,
        })
    }

    /// Parse a full lambda: `x => ...` or `(x) => ...`.
    pub fn parse_lambda(&mut self) -> Result<Expr> {
        let parenthesized = self.current_token_is(TokenType::OpenParen);
        if parenthesized {
            self.advance();
        }
        let parameter = self.expect(TokenType::Identifier)?.value;
        if parenthesized {
            self.expect(TokenType::CloseParen)?;
        }
        self.expect(TokenType::Arrow)?;

        self.parameter = Some(parameter.clone());
        let body = self.parse()?;
        Ok(Expr::lambda(parameter, body))
    }

    /// Parse an expression that must span the rest of the input.
    pub fn parse(&mut self) -> Result<Expr> {
        let expr = self.parse_expression()?;
        if !self.current_token_is(TokenType::Eof) {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    fn current_token(&self) -> &Token {
        // The lexer always terminates the stream with Eof, and advance() never moves past it.
        &self.tokens[self.position]
    }

    fn peek_token(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + offset).min(last)]
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    fn current_token_is(&self, token_type: TokenType) -> bool {
        self.current_token().is(token_type)
    }

    fn current_token_is_one_of(&self, types: &[TokenType]) -> bool {
        types.contains(&self.current_token().token_type)
    }

    fn expect(&mut self, token_type: TokenType) -> Result<Token> {
        let token = self.current_token().clone();
        if token.token_type != token_type {
            return Err(Error::ParseError(format!(
                "Expected {:?}, got {:?} at line {}, column {}",
                token_type, token.token_type, token.line, token.column
            )));
        }
        self.advance();
        Ok(token)
    }

    fn unexpected(&self) -> Error {
        let token = self.current_token();
        if token.is(TokenType::Eof) {
            return Error::ParseError("Unexpected end of input".into());
        }
        Error::ParseError(format!(
            "Unexpected token {:?} '{}' at line {}, column {}",
            token.token_type, token.value, token.line, token.column
        ))
    }

    fn check_recursion_depth(&mut self) -> Result<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            return Err(Error::ParseError(format!(
                "Expression too deeply nested (max depth: {})",
                MAX_RECURSION_DEPTH
            )));
        }
        Ok(())
    }

    fn parse_expression(&mut self) -> Result<Expr> {
        self.check_recursion_depth()?;
        let expr = self.parse_additive()?;
        self.recursion_depth -= 1;
        Ok(expr)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;
        let mut steps = 0;

        while self.current_token_is_one_of(&[TokenType::Plus, TokenType::Minus]) {
            self.check_recursion_depth()?;
            steps += 1;
            let operator = if self.current_token_is(TokenType::Plus) {
                BinaryOperator::Add
            } else {
                BinaryOperator::Subtract
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(operator, left, right);
        }

        self.recursion_depth -= steps;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        let mut steps = 0;

        loop {
            let operator = match self.current_token().token_type {
                TokenType::Multiply => BinaryOperator::Multiply,
                TokenType::Divide => BinaryOperator::Divide,
                TokenType::Percent => BinaryOperator::Modulo,
                _ => break,
            };
            self.check_recursion_depth()?;
            steps += 1;
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::binary(operator, left, right);
        }

        self.recursion_depth -= steps;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.current_token_is(TokenType::Minus) {
            self.advance();
            self.check_recursion_depth()?;
            let operand = self.parse_unary()?;
            self.recursion_depth -= 1;
            // Fold negative literals so `[-1]` stays a literal index
            return Ok(match operand {
                Expr::Constant(Value::Integer(i)) if i != i64::MIN => {
                    Expr::Constant(Value::Integer(-i))
                }
                Expr::Constant(Value::Decimal(d)) => Expr::Constant(Value::Decimal(-d)),
                other => Expr::negate(other),
            });
        }

        if self.is_cast_start() {
            self.advance(); // Skip '('
            let target_type = self.parse_type_name()?;
            self.expect(TokenType::CloseParen)?;
            self.check_recursion_depth()?;
            let operand = self.parse_unary()?;
            self.recursion_depth -= 1;
            return Ok(Expr::convert(operand, target_type));
        }

        self.parse_postfix()
    }

    /// `(` type `)` followed by something that can start an operand.
    fn is_cast_start(&self) -> bool {
        if !self.current_token_is(TokenType::OpenParen) {
            return false;
        }
        let mut offset = 1;
        if !self.peek_token(offset).is(TokenType::Identifier) {
            return false;
        }
        offset += 1;
        while self.peek_token(offset).is(TokenType::Dot)
            && self.peek_token(offset + 1).is(TokenType::Identifier)
        {
            offset += 2;
        }
        if !self.peek_token(offset).is(TokenType::CloseParen) {
            return false;
        }
        matches!(
            self.peek_token(offset + 1).token_type,
            TokenType::Identifier
                | TokenType::OpenParen
                | TokenType::IntegerLiteral
                | TokenType::DecimalLiteral
                | TokenType::StringLiteral
                | TokenType::True
                | TokenType::False
                | TokenType::Null
        )
    }

    /// Whether the tokens ahead read `IDENT (. IDENT)* ::`.
    fn is_static_member_start(&self) -> bool {
        let mut offset = 1;
        while self.peek_token(offset).is(TokenType::Dot)
            && self.peek_token(offset + 1).is(TokenType::Identifier)
        {
            offset += 2;
        }
        self.peek_token(offset).is(TokenType::DoubleColon)
    }

    fn parse_type_name(&mut self) -> Result<TypeName> {
        let mut parts = vec![self.expect(TokenType::Identifier)?.value];
        while self.current_token_is(TokenType::Dot) {
            self.advance();
            parts.push(self.expect(TokenType::Identifier)?.value);
        }
        Ok(TypeName::from_full_name(parts.join(".")))
    }

    /// Every `.member` and `[index]` step nests the tree one level deeper,
    /// so chain length counts toward the recursion limit.
    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        let mut steps = 0;

        loop {
            if self.current_token_is(TokenType::Dot) {
                self.check_recursion_depth()?;
                steps += 1;
                self.advance();
                let name = self.expect(TokenType::Identifier)?.value;
                expr = if self.current_token_is(TokenType::OpenParen) {
                    let arguments = self.parse_arguments()?;
                    Expr::call(Some(expr), name, arguments)
                } else {
                    Expr::member(expr, name)
                };
                continue;
            }

            if self.current_token_is(TokenType::OpenBracket) {
                self.check_recursion_depth()?;
                steps += 1;
                self.advance();
                let index = self.parse_expression()?;
                self.expect(TokenType::CloseBracket)?;
                expr = match index {
                    Expr::Constant(Value::Integer(i)) => Expr::array_index(expr, i),
                    other => Expr::call(Some(expr), INDEXER_METHOD, vec![other]),
                };
                continue;
            }

            break;
        }

        self.recursion_depth -= steps;
        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>> {
        self.expect(TokenType::OpenParen)?;
        let mut arguments = Vec::new();
        if !self.current_token_is(TokenType::CloseParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if self.current_token_is(TokenType::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(TokenType::CloseParen)?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.current_token().clone();
        match token.token_type {
            TokenType::IntegerLiteral => {
                self.advance();
                let value = token.value.parse::<i64>().map_err(|_| {
                    Error::ParseError(format!(
                        "Integer literal {} out of range at line {}, column {}",
                        token.value, token.line, token.column
                    ))
                })?;
                Ok(Expr::constant(value))
            }
            TokenType::DecimalLiteral => {
                self.advance();
                let value = Decimal::from_str(&token.value).map_err(|e| {
                    Error::ParseError(format!("Invalid decimal literal {}: {}", token.value, e))
                })?;
                Ok(Expr::constant(value))
            }
            TokenType::StringLiteral => {
                self.advance();
                Ok(Expr::Constant(Value::String(token.value)))
            }
            TokenType::True => {
                self.advance();
                Ok(Expr::constant(true))
            }
            TokenType::False => {
                self.advance();
                Ok(Expr::constant(false))
            }
            TokenType::Null => {
                self.advance();
                Ok(Expr::Constant(Value::Null))
            }
            TokenType::OpenParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenType::CloseParen)?;
                Ok(expr)
            }
            TokenType::Identifier if self.is_static_member_start() => {
                let declaring_type = self.parse_type_name()?;
                self.expect(TokenType::DoubleColon)?;
                let name = self.expect(TokenType::Identifier)?.value;
                if self.current_token_is(TokenType::OpenParen) {
                    let arguments = self.parse_arguments()?;
                    return Ok(Expr::call(None, name, arguments));
                }
                Ok(Expr::static_member(declaring_type, name))
            }
            TokenType::Identifier => {
                self.advance();
                if self.parameter.as_deref() == Some(token.value.as_str()) {
                    return Ok(Expr::parameter(token.value));
                }
                if self.current_token_is(TokenType::OpenParen) {
                    let arguments = self.parse_arguments()?;
                    return Ok(Expr::call(None, token.value, arguments));
                }
                Ok(Expr::variable(token.value))
            }
            _ => Err(self.unexpected()),
        }
    }
}
