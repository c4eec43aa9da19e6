//! Miscellaneous output helpers for the `j5` binary.

use anyhow::Context as _;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::path::{Path, PathError, Segment};
use crate::tokenizer::{Token, TokenKind};

/// Swallow broken pipes so that piping to tools like `less` or `head` exits
/// cleanly.
fn finish_write(result: io::Result<()>, what: &'static str) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context(what),
    }
}

// ==============================================================================
// Tokens
// ==============================================================================

/// Color a token's kind name by the class of token it is.
fn paint_kind(kind: TokenKind) -> ColoredString {
    let name = kind.to_string();
    match kind {
        TokenKind::Illegal => name.red().bold(),
        TokenKind::Eof => name.dimmed(),
        TokenKind::LineComment | TokenKind::BlockComment => name.bright_black(),
        TokenKind::QuotedString => name.green(),
        TokenKind::UnquotedString => name.cyan(),
        TokenKind::DecimalNumber | TokenKind::HexNumber => name.yellow(),
        TokenKind::Boolean => name.yellow().bold(),
        TokenKind::Null | TokenKind::Infinity | TokenKind::NaN => name.red().dimmed(),
        TokenKind::LeftBrace
        | TokenKind::RightBrace
        | TokenKind::LeftBracket
        | TokenKind::RightBracket
        | TokenKind::Comma
        | TokenKind::Colon => name.bold(),
    }
}

/// Write tokens one per line as `line:column  Kind "literal"`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_tokens<'a, W: Write>(
    writer: &mut W,
    tokens: impl IntoIterator<Item = &'a Token>,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        for token in tokens {
            let location = format!("{}:{}", token.line(), token.column());
            writeln!(
                writer,
                "{:<8} {} {}",
                location.magenta(),
                paint_kind(token.kind()),
                format!("{:?}", token.literal()).dimmed()
            )?;
        }
        Ok(())
    })();
    finish_write(result, "write tokens to stdout")
}

// ==============================================================================
// Paths
// ==============================================================================

/// Write the canonical form of `path` followed by one segment per line.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_path<W: Write>(writer: &mut W, path: &Path) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        let canonical = if path.is_empty() { "$".to_string() } else { path.to_string() };
        writeln!(writer, "{}", canonical.bold().magenta())?;
        for segment in path {
            match segment {
                Segment::Key(key) => {
                    let quoted = format!("{key:?}");
                    writeln!(writer, "  {:<6} {}", "key", quoted.green())?;
                }
                Segment::Index(index) => {
                    writeln!(writer, "  {:<6} {}", "index", index.to_string().yellow())?;
                }
            }
        }
        Ok(())
    })();
    finish_write(result, "write path to stdout")
}

/// Render a path error with the caret and message highlighted.
#[must_use]
pub fn colorize_path_error(err: &PathError) -> String {
    let annotated = err.annotate();
    let Some((head, tail)) = annotated.split_once('\n') else {
        return annotated;
    };
    let pad = tail.len() - tail.trim_start().len();
    format!(
        "{}\n{}{} {}",
        head,
        &tail[..pad],
        "^".red().bold(),
        err.message().red()
    )
}

// ==============================================================================
// JSON
// ==============================================================================

/// Write `value` as JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing to `writer` fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize JSON output")?;
    finish_write(writeln!(writer, "{rendered}"), "write JSON to stdout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse_path;
    use crate::tokenizer::tokenize;

    fn plain<F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>>(f: F) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn tokens_one_per_line() {
        let tokens = tokenize("{a: 'b'}");
        let output = plain(|w| write_colored_tokens(w, &tokens));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "1:1      Left Brace \"{\"");
        assert_eq!(lines[3], "1:5      Quoted String \"'b'\"");
        assert_eq!(lines[5], "1:9      EOF \"\"");
    }

    #[test]
    fn path_segments_listed() {
        let path = parse_path("a[2]['9z']").unwrap();
        let output = plain(|w| write_colored_path(w, &path));
        assert_eq!(
            output,
            "a[2][\"9z\"]\n  key    \"a\"\n  index  2\n  key    \"9z\"\n"
        );

        let root = plain(|w| write_colored_path(w, &Path::default()));
        assert_eq!(root, "$\n");
    }

    #[test]
    fn path_error_keeps_caret_column() {
        colored::control::set_override(false);
        let err = parse_path("foo..bar").unwrap_err();
        assert_eq!(colorize_path_error(&err), err.annotate());
    }

    #[test]
    fn json_output() {
        let tokens = tokenize("1");
        let output = plain(|w| write_json(w, &tokens, false));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["kind"], "DecimalNumber");
        assert_eq!(value[0]["literal"], "1");
        assert_eq!(value[1]["kind"], "Eof");
    }
}
