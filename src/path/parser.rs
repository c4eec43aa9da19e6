/*!
# Path Parser

Parser for converting path expression strings into [`Path`] objects.

## Syntax

A path is a sequence of segments. The first segment may be a bare key
(`foo`) or the root marker `$`, which is dropped from the result. Every
following segment is either `.key`, `[index]`, `["key"]`/`['key']`, or
`[key]`. Keys are made of ASCII letters, digits, `_` and `$`, and may not
start with a digit.

## Examples

```rust
use json5kit::path::{Path, Segment, parse_path};

let path: Path = parse_path("foo.bar[3].baz").expect("Invalid path string");
assert_eq!(
    path.segments(),
    &[
        Segment::key("foo"),
        Segment::key("bar"),
        Segment::index(3),
        Segment::key("baz"),
    ]
);
```

## Errors

If the input is invalid, [`parse_path`] returns a [`PathError`] pointing at
the offending character:

```rust
use json5kit::path::parse_path;

let err = parse_path(".foo").unwrap_err();
assert_eq!(err.offset(), 0);
assert_eq!(
    err.annotate(),
    "invalid path: .foo\n              ^ expected key or index, got '.'"
);
```
*/
use log::{debug, trace};
use std::error::Error;
use std::fmt;

use crate::path::{Path, Segment};
use crate::tokenizer::lexer::{is_identifier_part, is_identifier_start};

/// Prefix of every rendered path error.
const ERROR_PREFIX: &str = "invalid path: ";

/// A syntax error in a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    /// What went wrong
    message: String,
    /// Byte offset in `path` where the mismatch was detected
    offset: usize,
    /// The full path expression being parsed
    path: String,
}

impl PathError {
    /// The bare error message, e.g. `expected key, got "'"`.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the offending character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The path expression that failed to parse.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Renders the path on one line and a caret under the offending
    /// character on the next, followed by the message.
    ///
    /// ```text
    /// invalid path: foo.'bar'
    ///                   ^ expected key, got "'"
    /// ```
    #[must_use]
    pub fn annotate(&self) -> String {
        let column = self.path.get(..self.offset).map_or(self.offset, |s| s.chars().count());
        let pad = " ".repeat(ERROR_PREFIX.len() + column);
        format!("{ERROR_PREFIX}{}\n{pad}^ {}", self.path, self.message)
    }
}

impl Error for PathError {}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ERROR_PREFIX}{}", self.message)
    }
}

/// Single-pass cursor over a path expression.
struct PathParser<'a> {
    /// The path expression
    source: &'a str,
    /// Byte offset of `ch`
    position: usize,
    /// Byte offset just past `ch`
    read_position: usize,
    /// Character under examination, `None` at end of input
    ch: Option<char>,
    /// Lookahead character
    next: Option<char>,
}

impl<'a> PathParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut parser = Self {
            source,
            position: 0,
            read_position: 0,
            ch: None,
            next: None,
        };
        parser.read_char();
        parser
    }

    fn read_char(&mut self) {
        self.position = self.read_position;
        self.ch = self.source[self.read_position..].chars().next();
        if let Some(ch) = self.ch {
            self.read_position += ch.len_utf8();
        }
        self.next = self.source[self.read_position..].chars().next();
    }

    fn error(&self, message: String) -> PathError {
        self.error_at(self.position, message)
    }

    fn error_at(&self, offset: usize, message: String) -> PathError {
        let err = PathError {
            message,
            offset,
            path: self.source.to_string(),
        };
        debug!("{err} at offset {offset}");
        err
    }

    /// Fails unless the cursor is on the closing `]`, which is consumed.
    fn expect_close_bracket(&mut self) -> Result<(), PathError> {
        if self.ch != Some(']') {
            return Err(self.error(format!("expected ']', got {}", quote_char(self.ch))));
        }
        self.read_char();
        Ok(())
    }

    fn parse(mut self) -> Result<Path, PathError> {
        // Root marker
        if self.ch == Some('$') && !self.next.is_some_and(is_identifier_part) {
            self.read_char();
        }

        let mut segments = Vec::new();
        while let Some(segment) = self.next_segment()? {
            trace!("parsed segment {segment:?}");
            segments.push(segment);
        }
        Ok(Path::from_parsed(segments))
    }

    /// Reads one complete segment, or `None` at end of input.
    fn next_segment(&mut self) -> Result<Option<Segment>, PathError> {
        let Some(ch) = self.ch else {
            return Ok(None);
        };

        match ch {
            '.' => {
                if self.position == 0 {
                    return Err(self.error(format!(
                        "expected key or index, got {}",
                        quote_char(self.ch)
                    )));
                }
                if !self.next.is_some_and(is_identifier_start) {
                    return Err(self.error_at(
                        self.read_position,
                        format!("expected key, got {}", quote_char(self.next)),
                    ));
                }
                // Skip '.'
                self.read_char();
                Ok(Some(Segment::Key(self.read_identifier().to_string())))
            }
            '[' => self.read_bracketed().map(Some),
            _ if self.position > 0 => Err(self.error(format!(
                "expected '.' or '[', got {}",
                quote_char(self.ch)
            ))),
            c if is_identifier_start(c) => {
                Ok(Some(Segment::Key(self.read_identifier().to_string())))
            }
            c => {
                let digit = c.is_ascii_digit();
                let message = if digit
                    && self.next.is_some_and(|n| n.is_ascii_digit())
                {
                    "indexes must be in square brackets"
                } else if digit && self.next.is_some_and(is_identifier_part) {
                    "keys cannot start with a digit"
                } else {
                    "expected key or index"
                };
                Err(self.error(format!("{message}, got {}", quote_char(self.ch))))
            }
        }
    }

    /// Reads `[digits]`, `["key"]`, `['key']` or `[key]`.
    fn read_bracketed(&mut self) -> Result<Segment, PathError> {
        match self.next {
            Some(c) if c.is_ascii_digit() => {
                // Skip '['
                self.read_char();
                let index = self.read_index()?;
                self.expect_close_bracket()?;
                Ok(Segment::Index(index))
            }
            Some(quote @ ('"' | '\'')) => {
                // Skip '[' and the opening quote
                self.read_char();
                self.read_char();
                let key = self.read_identifier();
                if self.ch != Some(quote) {
                    return Err(self.error(format!(
                        "expected {}, got {}",
                        quote_char(Some(quote)),
                        quote_char(self.ch)
                    )));
                }
                // Skip closing quote
                self.read_char();
                self.expect_close_bracket()?;
                Ok(Segment::key(key))
            }
            // NOTE: unquoted keys in brackets are only accepted for
            // compatibility with older paths; render keys as `["key"]`.
            Some(c) if is_identifier_start(c) => {
                self.read_char();
                let key = self.read_identifier();
                self.expect_close_bracket()?;
                Ok(Segment::key(key))
            }
            Some(']') => Err(self.error_at(
                self.read_position,
                "expected key or index between brackets, got ']'".to_string(),
            )),
            next => Err(self.error_at(
                self.read_position,
                format!("expected key or index, got {}", quote_char(next)),
            )),
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let start = self.position;
        while self.ch.is_some_and(is_identifier_part) {
            self.read_char();
        }
        &self.source[start..self.position]
    }

    fn read_index(&mut self) -> Result<usize, PathError> {
        let start = self.position;
        while self.ch.is_some_and(|c| c.is_ascii_digit()) {
            self.read_char();
        }
        let digits = &self.source[start..self.position];
        digits
            .parse::<usize>()
            .map_err(|_| self.error_at(start, format!("expected index, got {digits:?}")))
    }
}

/// Quotes a character for an error message. End of input is spelled out.
fn quote_char(ch: Option<char>) -> String {
    match ch {
        None => "end of input".to_string(),
        Some('\'') => "\"'\"".to_string(),
        Some(c) if c.is_control() => format!("'{}'", c.escape_default()),
        Some(c) => format!("'{c}'"),
    }
}

/// Parse a path expression into a [`Path`].
///
/// # Errors
///
/// Returns a [`PathError`] carrying the offset of the first character that
/// does not fit the path grammar.
pub fn parse_path(input: &str) -> Result<Path, PathError> {
    PathParser::new(input).parse()
}
