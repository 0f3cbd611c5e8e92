//! Built-in arithmetic calculator tool.

use crate::schema::{ParamField, ParamType, ToolSchema};
use crate::tool::Tool;
use async_trait::async_trait;
use colloquy_protocol::ToolError;
use log::debug;
use serde_json::{Map, Value, json};

/// Tool that evaluates infix arithmetic expressions.
#[derive(Debug, Default)]
pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "Calculator"
    }

    fn description(&self) -> &str {
        "Perform mathematical calculations and operations"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new().field(
            ParamField::new(
                "expression",
                ParamType::String,
                "Arithmetic expression to evaluate, e.g. \"2 + 3 * 4\"",
            )
            .required(),
        )
    }

    async fn invoke(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let expression = args["expression"].as_str().unwrap_or_default();
        debug!("evaluating expression (len={})", expression.len());
        let result = evaluate(expression)?;
        Ok(json!({ "expression": expression, "result": result }))
    }
}

/// Evaluate an infix arithmetic expression.
///
/// Supports `+ - * / %`, parentheses, unary minus, and decimal literals.
pub fn evaluate(expression: &str) -> Result<f64, ToolError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ToolError::ExecutionFailed(format!(
            "unexpected trailing input in expression: {expression}"
        )));
    }
    if !value.is_finite() {
        return Err(ToolError::ExecutionFailed(
            "expression result is not finite".to_string(),
        ));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, ToolError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();
    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' | '\n' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&digit) = chars.peek() {
                    if digit.is_ascii_digit() || digit == '.' {
                        literal.push(digit);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal.parse::<f64>().map_err(|_| {
                    ToolError::ExecutionFailed(format!("invalid number literal: {literal}"))
                })?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(ToolError::ExecutionFailed(format!(
                    "unexpected character in expression: {other}"
                )));
            }
        }
    }
    if tokens.is_empty() {
        return Err(ToolError::ExecutionFailed("empty expression".to_string()));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, ToolError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.next();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.next();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ToolError> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.next();
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.next();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(ToolError::ExecutionFailed("division by zero".to_string()));
                    }
                    value /= divisor;
                }
                Token::Percent => {
                    self.next();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(ToolError::ExecutionFailed("division by zero".to_string()));
                    }
                    value %= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ToolError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(ToolError::ExecutionFailed(
                        "unbalanced parentheses".to_string(),
                    )),
                }
            }
            _ => Err(ToolError::ExecutionFailed(
                "expected a number or parenthesized expression".to_string(),
            )),
        }
    }
}
