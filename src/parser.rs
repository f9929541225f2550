//! Contains the recursive-descent `Parser`.
//!
//! The parser consumes the token sequence produced by the tokenizer and
//! builds a `Value` tree. Every decision is made on the single next
//! unconsumed token (LL(1)); there is no backtracking and no recovery.

use crate::error::{DecodeError, Position};
use crate::token::{Token, TokenKind};
use crate::value::{Map, Value};
use crate::DEFAULT_MAX_DEPTH;
use std::vec;

/// The recursive-descent JSON parser.
///
/// A `Parser` is created per token sequence and consumed by [`Parser::parse`].
pub struct Parser {
    /// The unconsumed tokens. The front of the slice is the lookahead.
    tokens: vec::IntoIter<Token>,
    /// The index of the next unconsumed token, used for error positions.
    pos: usize,
    /// The maximum allowed nesting depth of objects and arrays.
    max_depth: usize,
    /// The current nesting depth.
    depth: usize,
}

impl Parser {
    /// Creates a parser with the default nesting limit.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    /// Creates a parser that rejects nesting deeper than `max_depth`.
    ///
    /// Parsing recurses once per nesting level, so very large limits
    /// trade safety against stack exhaustion for permissiveness.
    pub fn with_max_depth(tokens: Vec<Token>, max_depth: usize) -> Self {
        Parser {
            tokens: tokens.into_iter(),
            pos: 0,
            max_depth,
            depth: 0,
        }
    }

    /// Parses the whole token sequence into a single root `Value`.
    ///
    /// # Errors
    /// * `EmptyTokens` if there are no tokens at all.
    /// * `InvalidRootObject` if the first token does not open an object or array.
    /// * `MultipleRootElements` if tokens remain after the root value.
    /// * Any error raised while parsing the root value itself.
    pub fn parse(mut self) -> Result<Value, DecodeError> {
        let first = self.peek().ok_or(DecodeError::EmptyTokens)?;
        if !matches!(first.kind(), TokenKind::OpenBrace | TokenKind::OpenBracket) {
            return Err(DecodeError::InvalidRootObject {
                position: self.at(),
                token: describe(first),
            });
        }

        let root = self.parse_value()?;

        if let Some(extra) = self.peek() {
            return Err(DecodeError::MultipleRootElements {
                position: self.at(),
                token: describe(extra),
            });
        }
        Ok(root)
    }

    #[inline]
    fn peek(&self) -> Option<&Token> {
        self.tokens.as_slice().first()
    }

    #[inline]
    fn at(&self) -> Position {
        Position::Token(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.next()?;
        self.pos += 1;
        Some(token)
    }

    fn eof(&self) -> DecodeError {
        DecodeError::UnexpectedEof {
            position: self.at(),
        }
    }

    /// The error for a current token the grammar cannot accept here.
    fn unexpected(&self) -> DecodeError {
        match self.peek() {
            Some(token) => DecodeError::UnexpectedToken {
                position: self.at(),
                token: describe(token),
            },
            None => self.eof(),
        }
    }

    /// Consumes the current token if it has the `expected` kind.
    fn read_next_token(&mut self, expected: TokenKind) -> Result<Token, DecodeError> {
        let token = self.peek().ok_or_else(|| self.eof())?;
        if token.kind() != expected {
            return Err(self.unexpected());
        }
        self.advance().ok_or_else(|| self.eof())
    }

    /// Consumes the current token and returns its text.
    fn consume_text(&mut self) -> Result<String, DecodeError> {
        self.advance()
            .map(Token::into_text)
            .ok_or_else(|| self.eof())
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                position: self.at(),
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        let kind = match self.peek() {
            Some(token) => token.kind(),
            None => return Err(self.eof()),
        };

        match kind {
            TokenKind::OpenBrace => self.parse_object(),
            TokenKind::OpenBracket => self.parse_array(),
            TokenKind::String => Ok(Value::String(self.consume_text()?)),
            TokenKind::Integer => {
                let position = self.at();
                let text = self.consume_text()?;
                parse_integer(&text, position)
            }
            TokenKind::Float => {
                let position = self.at();
                let text = self.consume_text()?;
                parse_float(&text, position)
            }
            TokenKind::Bool => Ok(Value::Bool(self.consume_text()? == "true")),
            TokenKind::Null => {
                self.consume_text()?;
                Ok(Value::Null)
            }
            TokenKind::CloseBrace
            | TokenKind::CloseBracket
            | TokenKind::Colon
            | TokenKind::Comma => Err(self.unexpected()),
        }
    }

    /// `{` ( string `:` value ( `,` string `:` value )* )? `}`
    fn parse_object(&mut self) -> Result<Value, DecodeError> {
        self.enter()?;
        self.read_next_token(TokenKind::OpenBrace)?;

        let mut object = Map::new();
        let mut first = true;
        loop {
            match self.peek() {
                None => return Err(self.eof()),
                Some(token) if token.kind() == TokenKind::CloseBrace => {
                    self.advance();
                    self.depth -= 1;
                    return Ok(Value::Object(object));
                }
                Some(_) => {}
            }

            if !first {
                self.read_next_token(TokenKind::Comma)?;
            }
            let key = self.read_next_token(TokenKind::String)?.into_text();
            self.read_next_token(TokenKind::Colon)?;
            let value = self.parse_value()?;

            // Duplicate keys: the later value wins.
            object.insert(key, value);
            first = false;
        }
    }

    /// `[` ( value ( `,` value )* )? `]`
    fn parse_array(&mut self) -> Result<Value, DecodeError> {
        self.enter()?;
        self.read_next_token(TokenKind::OpenBracket)?;

        let mut array = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.eof()),
                Some(token) if token.kind() == TokenKind::CloseBracket => {
                    self.advance();
                    self.depth -= 1;
                    return Ok(Value::Array(array));
                }
                Some(_) => {}
            }

            if !array.is_empty() {
                self.read_next_token(TokenKind::Comma)?;
            }
            array.push(self.parse_value()?);
        }
    }
}

/// Renders a token for an error message; strings are re-quoted.
fn describe(token: &Token) -> String {
    match token.kind() {
        TokenKind::String => format!("\"{}\"", token.text()),
        _ => token.text().to_string(),
    }
}

fn parse_integer(text: &str, position: Position) -> Result<Value, DecodeError> {
    text.parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| DecodeError::InvalidNumber {
            position,
            detail: format!("integer '{}' does not fit in 64 bits", text),
        })
}

fn parse_float(text: &str, position: Position) -> Result<Value, DecodeError> {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Value::Float(n)),
        _ => Err(DecodeError::InvalidNumber {
            position,
            detail: format!("float '{}' is out of range", text),
        }),
    }
}

/// Parses a token sequence into a `Value`. See [`Parser::parse`].
pub fn parse(tokens: Vec<Token>) -> Result<Value, DecodeError> {
    Parser::new(tokens).parse()
}
