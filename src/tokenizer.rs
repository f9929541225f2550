//! The byte-based tokenizer (lexer).
//!
//! Consumes the raw input `&str` (as `&[u8]`) in a single left-to-right
//! pass and produces `Token`s. Every error is raised at the byte offset
//! known at the moment of failure.

use crate::error::{DecodeError, Position};
use crate::token::{Token, TokenKind};
use memchr::memchr2;

// --- The Lookup Table (LUT) ---
// A 256-entry array classifying every byte that may start a token.
const W: u8 = 1; // Whitespace
const S: u8 = 2; // Structural
const L: u8 = 3; // Literal
const D: u8 = 4; // Digit or '-'
const Q: u8 = 5; // Quote

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[b'\t' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    table[b'"' as usize] = Q;

    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: every other byte is invalid at the start of a token
    table
};

/// The tokenizer (lexer).
///
/// Holds the input and a single scan cursor. It is an `Iterator` over
/// `Result<Token, DecodeError>` and stops for good after the first error.
pub struct Tokenizer<'a> {
    /// The input text; kept alongside `bytes` for zero-copy slicing.
    input: &'a str,
    /// The raw byte view of `input`.
    bytes: &'a [u8],
    /// The current byte offset into `bytes`.
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            bytes: input.as_bytes(),
            cursor: 0,
        }
    }

    /// Scans the whole input into an ordered token sequence.
    ///
    /// # Errors
    /// Returns `DecodeError::EmptyInput` for a zero-length input, or the
    /// first lexical error encountered.
    pub fn tokenize(self) -> Result<Vec<Token>, DecodeError> {
        if self.input.is_empty() {
            return Err(DecodeError::EmptyInput);
        }
        self.collect()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    /// The full character starting at `offset`, for error payloads.
    fn char_at(&self, offset: usize) -> String {
        self.input
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map(String::from)
            .unwrap_or_else(|| format!("\\x{:02x}", self.bytes[offset]))
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if BYTE_PROPERTIES[byte as usize] != W {
                break;
            }
            self.cursor += 1;
        }
    }

    /// Advances over a run of ASCII digits, returning how many there were.
    #[inline]
    fn skip_digits(&mut self) -> usize {
        let count = self.bytes[self.cursor..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.cursor += count;
        count
    }

    /// Lexes `true`, `false` or `null`. Only an exact match is accepted.
    fn lex_literal(
        &mut self,
        expected: &'static str,
        kind: TokenKind,
    ) -> Result<Token, DecodeError> {
        let start = self.cursor;
        let end = start + expected.len();
        if self.bytes.get(start..end) == Some(expected.as_bytes()) {
            self.cursor = end;
            return Ok(Token::new(kind, expected));
        }

        let rest = &self.bytes[start..];
        if expected.as_bytes().starts_with(rest) {
            // A valid prefix cut short by the end of input.
            return Err(DecodeError::UnexpectedEof {
                position: Position::Offset(start),
            });
        }
        let word_len = rest
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count()
            .max(1);
        Err(DecodeError::UnexpectedToken {
            position: Position::Offset(start),
            token: self.input[start..start + word_len].to_string(),
        })
    }

    fn number_error(&self, detail: &str) -> DecodeError {
        DecodeError::InvalidNumber {
            position: Position::Offset(self.cursor),
            detail: detail.to_string(),
        }
    }

    /// Lexes a number: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
    ///
    /// The lexeme is kept verbatim; conversion happens in the parser.
    fn lex_number(&mut self) -> Result<Token, DecodeError> {
        let start = self.cursor;
        let mut kind = TokenKind::Integer;

        if self.peek() == Some(b'-') {
            self.cursor += 1;
        }

        match self.peek() {
            Some(b'0') => {
                self.cursor += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(self.number_error("leading zeros are not allowed"));
                }
            }
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(self.number_error("expected a digit")),
        }

        if self.peek() == Some(b'.') {
            kind = TokenKind::Float;
            self.cursor += 1;
            if self.skip_digits() == 0 {
                return Err(self.number_error("expected a digit after '.'"));
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            kind = TokenKind::Float;
            self.cursor += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.cursor += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.number_error("expected a digit in the exponent"));
            }
        }

        Ok(Token::new(kind, &self.input[start..self.cursor]))
    }

    /// Lexes a string literal, decoding escapes as it goes.
    ///
    /// Plain runs between escapes are located with `memchr2` and copied
    /// as whole slices.
    fn lex_string(&mut self) -> Result<Token, DecodeError> {
        let open = self.cursor;
        self.cursor += 1; // Consume opening '"'

        let mut value = String::new();
        loop {
            let rest = &self.bytes[self.cursor..];
            let stop = memchr2(b'"', b'\\', rest).unwrap_or(rest.len());

            if let Some(i) = rest[..stop].iter().position(|&b| b < 0x20) {
                let offset = self.cursor + i;
                return Err(DecodeError::InvalidCharacter {
                    position: Position::Offset(offset),
                    fragment: (self.bytes[offset] as char).escape_default().to_string(),
                });
            }

            // `stop` sits on an ASCII byte or the end, so both ends are char boundaries.
            value.push_str(&self.input[self.cursor..self.cursor + stop]);
            self.cursor += stop;

            match self.peek() {
                Some(b'"') => {
                    self.cursor += 1;
                    return Ok(Token::new(TokenKind::String, value));
                }
                Some(_) => self.lex_escape(open, &mut value)?,
                None => {
                    return Err(DecodeError::UnexpectedEof {
                        position: Position::Offset(open),
                    })
                }
            }
        }
    }

    /// Decodes one escape sequence. The cursor is on the backslash.
    fn lex_escape(&mut self, open: usize, value: &mut String) -> Result<(), DecodeError> {
        self.cursor += 1;
        let Some(escape) = self.peek() else {
            return Err(DecodeError::UnexpectedEof {
                position: Position::Offset(open),
            });
        };

        let decoded = match escape {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                self.cursor += 1;
                let c = self.lex_unicode_escape(open)?;
                value.push(c);
                return Ok(());
            }
            _ => {
                return Err(DecodeError::InvalidCharacter {
                    position: Position::Offset(self.cursor),
                    fragment: format!("\\{}", self.char_at(self.cursor)),
                })
            }
        };
        self.cursor += 1;
        value.push(decoded);
        Ok(())
    }

    /// Decodes the `XXXX` of a `\uXXXX` escape. The cursor is on the first hex digit.
    ///
    /// A high surrogate directly followed by a `\u` low surrogate is combined
    /// into one code point; lone surrogates become U+FFFD.
    fn lex_unicode_escape(&mut self, open: usize) -> Result<char, DecodeError> {
        let code = self.read_hex4(open)?;
        if !(0xD800..=0xDBFF).contains(&code) {
            return Ok(char::from_u32(u32::from(code)).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        if self.bytes.get(self.cursor..self.cursor + 2) == Some(b"\\u") {
            let resume = self.cursor;
            self.cursor += 2;
            let low = self.read_hex4(open)?;
            if (0xDC00..=0xDFFF).contains(&low) {
                let combined =
                    0x10000 + ((u32::from(code) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            // Not a low surrogate: the second escape is decoded on its own.
            self.cursor = resume;
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn read_hex4(&mut self, open: usize) -> Result<u16, DecodeError> {
        let mut code: u16 = 0;
        for _ in 0..4 {
            let Some(byte) = self.peek() else {
                return Err(DecodeError::UnexpectedEof {
                    position: Position::Offset(open),
                });
            };
            let digit = (byte as char)
                .to_digit(16)
                .ok_or_else(|| DecodeError::InvalidCharacter {
                    position: Position::Offset(self.cursor),
                    fragment: self.char_at(self.cursor),
                })?;
            code = (code << 4) | digit as u16;
            self.cursor += 1;
        }
        Ok(code)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, DecodeError>;

    /// Gets the next `Token` from the input.
    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let byte = self.peek()?;

        let result = match BYTE_PROPERTIES[byte as usize] {
            S => {
                let start = self.cursor;
                self.cursor += 1;
                let kind = match byte {
                    b'{' => TokenKind::OpenBrace,
                    b'}' => TokenKind::CloseBrace,
                    b'[' => TokenKind::OpenBracket,
                    b']' => TokenKind::CloseBracket,
                    b':' => TokenKind::Colon,
                    b',' => TokenKind::Comma,
                    _ => unreachable!(), // LUT guarantees this
                };
                Ok(Token::new(kind, &self.input[start..self.cursor]))
            }
            L => match byte {
                b't' => self.lex_literal("true", TokenKind::Bool),
                b'f' => self.lex_literal("false", TokenKind::Bool),
                b'n' => self.lex_literal("null", TokenKind::Null),
                _ => unreachable!(), // LUT guarantees this
            },
            D => self.lex_number(),
            Q => self.lex_string(),
            _ => Err(DecodeError::UnexpectedToken {
                position: Position::Offset(self.cursor),
                token: self.char_at(self.cursor),
            }),
        };

        if result.is_err() {
            // Fail fast: nothing after the first error is scanned.
            self.cursor = self.bytes.len();
        }
        Some(result)
    }
}

/// Tokenizes `input` in one pass. See [`Tokenizer::tokenize`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, DecodeError> {
    Tokenizer::new(input).tokenize()
}
