//! # JSON5 Token
//!
//! Defines the tokens produced from scanning a JSON5 document, along with the
//! source position every token carries.
use serde::Serialize;
use std::fmt::Display;

/// Location of a token (or document node) in the source text.
///
/// `offset` is a zero-based byte index; `line` and `column` are 1-based and
/// meant for humans. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Byte offset from the start of the source
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Position {
    /// Creates a position with the given values.
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kind of a JSON5 token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /* Reserved */
    /// Input that could not be classified
    Illegal,

    /// End of input
    Eof,

    /* Delimiters */
    /// Opening curly brace
    LeftBrace,

    /// Closing curly brace
    RightBrace,

    /// Opening square bracket
    LeftBracket,

    /// Closing square bracket
    RightBracket,

    /// Comma character
    Comma,

    /// Colon character
    Colon,

    /* Comments */
    /// `// ...` up to the end of the line
    LineComment,

    /// `/* ... */`
    BlockComment,

    /* Strings */
    /// Bare identifier, e.g. an object key written without quotes
    UnquotedString,

    /// Single- or double-quoted string
    QuotedString,

    /* Values */
    /// `true` or `false`
    Boolean,

    /// `null`
    Null,

    /// Decimal number, e.g. `+1`, `.5`, `5.`, `1e10`
    DecimalNumber,

    /// Hexadecimal number, e.g. `0xFF`
    HexNumber,

    /// `Infinity`, optionally signed
    Infinity,

    /// `NaN`, optionally signed
    NaN,
}

impl TokenKind {
    /// Returns `true` for kinds that carry a value rather than structure.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::UnquotedString
                | Self::QuotedString
                | Self::Boolean
                | Self::Null
                | Self::DecimalNumber
                | Self::HexNumber
                | Self::Infinity
                | Self::NaN
        )
    }

    /// Returns `true` for line and block comments.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Illegal => "Illegal",
            Self::Eof => "EOF",
            Self::LeftBrace => "Left Brace",
            Self::RightBrace => "Right Brace",
            Self::LeftBracket => "Left Bracket",
            Self::RightBracket => "Right Bracket",
            Self::Comma => "Comma",
            Self::Colon => "Colon",
            Self::LineComment => "Line Comment",
            Self::BlockComment => "Block Comment",
            Self::UnquotedString => "Unquoted String",
            Self::QuotedString => "Quoted String",
            Self::Boolean => "Boolean",
            Self::Null => "null",
            Self::DecimalNumber => "Decimal Number",
            Self::HexNumber => "Hex Number",
            Self::Infinity => "Infinity",
            Self::NaN => "NaN",
        };
        f.write_str(name)
    }
}

/// Looks up a reserved keyword literal, returning its kind.
///
/// Only the five JSON5 keywords are reserved; everything else scanned as an
/// identifier is an [`TokenKind::UnquotedString`].
#[must_use]
pub fn lookup_keyword(literal: &str) -> Option<TokenKind> {
    match literal {
        "true" | "false" => Some(TokenKind::Boolean),
        "null" => Some(TokenKind::Null),
        "Infinity" => Some(TokenKind::Infinity),
        "NaN" => Some(TokenKind::NaN),
        _ => None,
    }
}

/// A single lexical unit: its kind, literal text and where it starts.
///
/// For [`TokenKind::QuotedString`] the literal is the decoded string wrapped
/// in its original quotes. Every other kind carries the source text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    literal: String,
    #[serde(flatten)]
    position: Position,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }

    /// The kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal text of this token.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Where this token starts in the source.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Zero-based byte offset of the token start.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.position.offset
    }

    /// 1-based line of the token start.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    /// 1-based column of the token start.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    /// Returns `true` if this is an end-of-input token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.kind, self.literal)
    }
}
