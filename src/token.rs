//! Defines the `Token` and `TokenKind` types.
//!
//! These are the intermediate representation between the `Tokenizer`
//! (lexer) and the `Parser`. A token carries its decoded text but no
//! position; errors are positioned at the moment they are raised.

/// The kind of a `Token`.
///
/// This represents the smallest meaningful units of JSON grammar.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A string literal, e.g. `"hello"`
    String,
    /// A number without fraction or exponent, e.g. `-12`
    Integer,
    /// A number with a fraction and/or exponent, e.g. `1.5e3`
    Float,
    /// `true` or `false`
    Bool,
    /// `null`
    Null,
}

/// A single token produced by the `Tokenizer`.
///
/// `text` is the decoded content: the unescaped value for strings,
/// the raw lexeme for numbers, and the literal spelling for everything
/// else.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    /// The kind of this token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The decoded text of this token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the token, returning its text.
    pub(crate) fn into_text(self) -> String {
        self.text
    }
}
