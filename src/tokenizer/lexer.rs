//! # JSON5 Lexer
//!
//! Scans JSON5 source text into a sequence of position-annotated tokens, one
//! token per call to [`Lexer::next_token`].
//!
//! Malformed input never aborts scanning: it is reported as a
//! [`TokenKind::Illegal`] token at the offending position and the caller
//! decides whether to stop or keep going.
use log::{debug, trace};
use std::fmt;
use std::iter::FusedIterator;

use crate::tokenizer::token::{Position, Token, TokenKind, lookup_keyword};

/// Reasons a token could not be scanned. Surfaced as [`TokenKind::Illegal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanError {
    /// End of input or an unescaped line terminator before the closing quote
    UnterminatedString,
    /// `\u` not followed by four hex digits, or a lone surrogate
    InvalidUnicodeEscape,
    /// `/*` without a matching `*/`
    UnterminatedComment,
    /// Number without digits where digits are required
    MalformedNumber,
    /// A sign followed by something other than a number, `Infinity` or `NaN`
    UnexpectedSign,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::InvalidUnicodeEscape => {
                write!(f, "invalid Unicode escape sequence")
            }
            Self::UnterminatedComment => write!(f, "unterminated block comment"),
            Self::MalformedNumber => write!(f, "malformed number"),
            Self::UnexpectedSign => write!(f, "sign must precede a number"),
        }
    }
}

/// A lexer over an in-memory JSON5 source string.
///
/// The lexer owns its cursor (`position`, `ch`, `next`, `line`, `column`)
/// and never mutates the source, so independent lexers may scan the same
/// text in parallel.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The source text to tokenize
    source: &'a str,
    /// Byte offset of `ch`
    position: usize,
    /// Byte offset just past `ch`. A CRLF pair is read as a single `\r`.
    read_position: usize,
    /// Character under examination, `None` at end of input
    ch: Option<char>,
    /// Lookahead character
    next: Option<char>,
    /// Line of `ch` (1-indexed)
    line: usize,
    /// Column of `ch` (1-indexed, in characters)
    column: usize,
    /// Set once the iterator has yielded the end-of-input token
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Self {
            source,
            position: 0,
            read_position: 0,
            ch: None,
            next: None,
            line: 1,
            column: 1,
            finished: false,
        };
        // put the lexer in an initial working state
        lexer.read_char();
        lexer
    }

    /// Reads and consumes the next character, updating line and column
    /// bookkeeping for the character left behind.
    fn read_char(&mut self) {
        if let Some(ch) = self.ch {
            if is_line_terminator(ch) {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.position = self.read_position;
        self.ch = self.source[self.read_position..].chars().next();
        if let Some(ch) = self.ch {
            self.read_position += ch.len_utf8();
            // Treat CRLF as a single line terminator
            if ch == '\r' && self.source[self.read_position..].starts_with('\n') {
                self.read_position += 1;
            }
        }
        self.next = self.source[self.read_position..].chars().next();
    }

    /// Consumes characters while `pred` holds, returning how many were read.
    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.ch.is_some_and(&pred) {
            self.read_char();
            count += 1;
        }
        count
    }

    /// Position of the character under examination.
    const fn here(&self) -> Position {
        Position::new(self.position, self.line, self.column)
    }

    /// Builds a token whose literal is the source text from `start` up to the
    /// current position. CRLF pairs inside the span read as a single `\n`,
    /// so a document and its CRLF copy yield identical literals.
    fn token_from(&self, kind: TokenKind, start: Position) -> Token {
        let raw = &self.source[start.offset..self.position];
        if raw.contains("\r\n") {
            Token::new(kind, raw.replace("\r\n", "\n"), start)
        } else {
            Token::new(kind, raw, start)
        }
    }

    /// Builds an illegal token spanning `start` to the current position.
    fn illegal(&self, reason: ScanError, start: Position) -> Token {
        debug!("{reason} at {start}");
        self.token_from(TokenKind::Illegal, start)
    }

    fn skip_whitespace(&mut self) {
        self.read_while(is_whitespace);
    }

    /// Returns the next token in the input.
    ///
    /// Once the end of input is reached every further call returns an
    /// [`TokenKind::Eof`] token at the same position.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.here();
        let Some(ch) = self.ch else {
            return Token::new(TokenKind::Eof, "", start);
        };

        let token = match ch {
            '{' => self.single(TokenKind::LeftBrace, start),
            '}' => self.single(TokenKind::RightBrace, start),
            '[' => self.single(TokenKind::LeftBracket, start),
            ']' => self.single(TokenKind::RightBracket, start),
            ',' => self.single(TokenKind::Comma, start),
            ':' => self.single(TokenKind::Colon, start),
            '"' | '\'' => self.read_string_token(ch, start),
            '/' => self.read_comment_token(start),
            c if is_number_start(c) => self.read_number_token(start),
            c if is_identifier_start(c) => self.read_identifier_token(start),
            _ => {
                debug!("unexpected character {ch:?} at {start}");
                self.single(TokenKind::Illegal, start)
            }
        };

        trace!("{token} at {}", token.position());
        token
    }

    /// Consumes one character and returns it as a token of `kind`.
    fn single(&mut self, kind: TokenKind, start: Position) -> Token {
        self.read_char();
        self.token_from(kind, start)
    }

    fn read_string_token(&mut self, quote: char, start: Position) -> Token {
        match self.read_string(quote) {
            Ok(literal) => Token::new(TokenKind::QuotedString, literal, start),
            Err(err) => self.illegal(err, start),
        }
    }

    /// Reads a quoted string, returning the decoded content wrapped in its
    /// quotes.
    ///
    /// A bad `\u` escape does not stop the scan: the rest of the string is
    /// consumed so that scanning resumes after the closing quote.
    fn read_string(&mut self, quote: char) -> Result<String, ScanError> {
        // Skip opening quote
        self.read_char();

        let mut value = String::from(quote);
        let mut failure = None;
        loop {
            match self.ch {
                None => return Err(ScanError::UnterminatedString),
                Some(c) if c == quote => break,
                Some(c) if is_line_terminator(c) => {
                    return Err(ScanError::UnterminatedString);
                }
                Some('\\') => {
                    self.read_char();
                    if let Err(err) = self.read_escape(&mut value) {
                        failure.get_or_insert(err);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.read_char();
                }
            }
        }

        // Skip closing quote
        self.read_char();
        value.push(quote);

        failure.map_or(Ok(value), Err)
    }

    /// Decodes the escape sequence whose backslash was just consumed.
    fn read_escape(&mut self, value: &mut String) -> Result<(), ScanError> {
        let Some(ch) = self.ch else {
            // the caller reports the unterminated string
            return Ok(());
        };

        let decoded = match ch {
            '\\' => '\\',
            '/' => '/',
            '"' => '"',
            '\'' => '\'',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'u' | 'U' => {
                self.read_char();
                return self.read_unicode_escape(value);
            }
            c if is_line_terminator(c) => {
                // line continuation
                self.read_char();
                return Ok(());
            }
            _ => {
                // Invalid escape sequence: keep the backslash and let the
                // escaped character be read as ordinary content.
                value.push('\\');
                return Ok(());
            }
        };

        value.push(decoded);
        self.read_char();
        Ok(())
    }

    /// Decodes the four hex digits of a `\u` escape, combining a UTF-16
    /// surrogate pair written as two consecutive escapes.
    fn read_unicode_escape(&mut self, value: &mut String) -> Result<(), ScanError> {
        let unit = self.read_hex4()?;

        let code = if (0xD800..0xDC00).contains(&unit) {
            if self.ch != Some('\\') || !matches!(self.next, Some('u' | 'U')) {
                return Err(ScanError::InvalidUnicodeEscape);
            }
            self.read_char();
            self.read_char();
            let low = self.read_hex4()?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(ScanError::InvalidUnicodeEscape);
            }
            0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
        } else {
            unit
        };

        let decoded = char::from_u32(code).ok_or(ScanError::InvalidUnicodeEscape)?;
        value.push(decoded);
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<u32, ScanError> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self
                .ch
                .and_then(|c| c.to_digit(16))
                .ok_or(ScanError::InvalidUnicodeEscape)?;
            code = code * 16 + digit;
            self.read_char();
        }
        Ok(code)
    }

    fn read_comment_token(&mut self, start: Position) -> Token {
        match self.next {
            Some('/') => {
                self.read_while(|c| !is_line_terminator(c));
                self.token_from(TokenKind::LineComment, start)
            }
            Some('*') => {
                // Skip `/*`
                self.read_char();
                self.read_char();
                loop {
                    match self.ch {
                        None => {
                            return self.illegal(ScanError::UnterminatedComment, start);
                        }
                        Some('*') if self.next == Some('/') => {
                            self.read_char();
                            self.read_char();
                            return self.token_from(TokenKind::BlockComment, start);
                        }
                        Some(_) => self.read_char(),
                    }
                }
            }
            _ => {
                debug!("lone '/' at {start}");
                self.single(TokenKind::Illegal, start)
            }
        }
    }

    /// Reads a JSON5 number (sign, hex or int/frac/exp) and returns a
    /// number token whose literal is the source text verbatim.
    fn read_number_token(&mut self, start: Position) -> Token {
        // optional leading sign
        if matches!(self.ch, Some('+' | '-')) {
            self.read_char();

            // -Infinity, +NaN
            if self.ch.is_some_and(is_identifier_start) {
                return match self.read_identifier() {
                    "Infinity" => self.token_from(TokenKind::Infinity, start),
                    "NaN" => self.token_from(TokenKind::NaN, start),
                    _ => self.illegal(ScanError::UnexpectedSign, start),
                };
            }
        }

        if self.ch == Some('0') && matches!(self.next, Some('x' | 'X')) {
            // Skip `0x`
            self.read_char();
            self.read_char();
            if self.read_while(|c| c.is_ascii_hexdigit()) == 0 {
                return self.illegal(ScanError::MalformedNumber, start);
            }
            return self.token_from(TokenKind::HexNumber, start);
        }

        // integer part
        let mut digits = self.read_while(|c| c.is_ascii_digit());

        // fractional part
        if self.ch == Some('.') {
            self.read_char();
            digits += self.read_while(|c| c.is_ascii_digit());
        }

        if digits == 0 {
            return self.illegal(ScanError::MalformedNumber, start);
        }

        // exponent part
        if matches!(self.ch, Some('e' | 'E')) {
            self.read_char();
            if matches!(self.ch, Some('+' | '-')) {
                self.read_char();
            }
            if self.read_while(|c| c.is_ascii_digit()) == 0 {
                return self.illegal(ScanError::MalformedNumber, start);
            }
        }

        self.token_from(TokenKind::DecimalNumber, start)
    }

    fn read_identifier_token(&mut self, start: Position) -> Token {
        let literal = self.read_identifier();
        let kind = lookup_keyword(literal).unwrap_or(TokenKind::UnquotedString);
        self.token_from(kind, start)
    }

    fn read_identifier(&mut self) -> &'a str {
        let start = self.position;
        self.read_while(is_identifier_part);
        &self.source[start..self.position]
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to and including the first end-of-input token.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is_eof();
        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenize a JSON5 document, returning every token including the final
/// end-of-input token.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

const fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t') || is_line_terminator(ch)
}

const fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

const fn is_number_start(ch: char) -> bool {
    matches!(ch, '0'..='9' | '-' | '+' | '.')
}

/// Returns `true` for characters that may start an identifier.
#[must_use]
pub const fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, '_' | '$')
}

/// Returns `true` for characters that may continue an identifier.
#[must_use]
pub const fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KITCHEN_SINK: &str = include_str!("../../tests/data/kitchen_sink.json5");

    /// Kind, literal, line and column of every token in the kitchen sink.
    fn kitchen_sink_tokens() -> Vec<(TokenKind, &'static str, usize, usize)> {
        use TokenKind::*;
        vec![
            (LeftBrace, "{", 1, 1),
            (LineComment, "// line comment", 2, 3),
            (BlockComment, "/* block comment */", 3, 3),
            (UnquotedString, "unquoted", 4, 3),
            (Colon, ":", 4, 11),
            (QuotedString, "\"and you can quote me on that\"", 4, 13),
            (Comma, ",", 4, 43),
            (UnquotedString, "singleQuotes", 5, 3),
            (Colon, ":", 5, 15),
            (QuotedString, "'I can use \"double quotes\" here'", 5, 17),
            (Comma, ",", 5, 49),
            (UnquotedString, "escapeSequences", 6, 3),
            (Colon, ":", 6, 18),
            (QuotedString, "\"\n\r\t\u{8}\u{c}\u{1E8}\"", 6, 20),
            (Comma, ",", 6, 38),
            (UnquotedString, "lineBreaks", 7, 3),
            (Colon, ":", 7, 13),
            (QuotedString, r#""Look, Mom! No \n's!""#, 7, 15),
            (Comma, ",", 8, 11),
            (UnquotedString, "hexadecimal", 9, 3),
            (Colon, ":", 9, 14),
            (HexNumber, "0xdecaf", 9, 16),
            (Comma, ",", 9, 23),
            (UnquotedString, "leadingDecimalPoint", 10, 3),
            (Colon, ":", 10, 22),
            (DecimalNumber, ".8675309", 10, 24),
            (Comma, ",", 10, 32),
            (UnquotedString, "andTrailing", 10, 34),
            (Colon, ":", 10, 45),
            (DecimalNumber, "8675309.", 10, 47),
            (Comma, ",", 10, 55),
            (UnquotedString, "positiveSign", 11, 3),
            (Colon, ":", 11, 15),
            (DecimalNumber, "+1", 11, 17),
            (Comma, ",", 11, 19),
            (UnquotedString, "trailingComma", 12, 3),
            (Colon, ":", 12, 16),
            (QuotedString, "'in objects'", 12, 18),
            (Comma, ",", 12, 30),
            (UnquotedString, "andIn", 12, 32),
            (Colon, ":", 12, 37),
            (LeftBracket, "[", 12, 39),
            (QuotedString, "'arrays'", 12, 40),
            (Comma, ",", 12, 48),
            (RightBracket, "]", 12, 49),
            (Comma, ",", 12, 50),
            (QuotedString, "\"backwardsCompatible\"", 13, 3),
            (Colon, ":", 13, 24),
            (QuotedString, "\"with JSON\"", 13, 26),
            (Comma, ",", 13, 37),
            (RightBrace, "}", 14, 1),
            (Eof, "", 15, 1),
        ]
    }

    fn summarize(source: &str) -> Vec<(TokenKind, String, usize, usize)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind(), t.literal().to_string(), t.line(), t.column()))
            .collect()
    }

    fn assert_kitchen_sink(source: &str) {
        let expected = kitchen_sink_tokens();
        let actual = summarize(source);
        assert_eq!(actual.len(), expected.len(), "Actual tokens: {actual:#?}");
        for (i, (got, want)) in actual.iter().zip(&expected).enumerate() {
            assert_eq!(
                (got.0, got.1.as_str(), got.2, got.3),
                *want,
                "token {i} mismatch"
            );
        }
    }

    #[test]
    fn kitchen_sink_lf() {
        assert!(!KITCHEN_SINK.contains('\r'));
        assert_kitchen_sink(KITCHEN_SINK);
    }

    #[test]
    fn kitchen_sink_crlf() {
        let crlf = KITCHEN_SINK.replace('\n', "\r\n");
        assert_kitchen_sink(&crlf);
    }

    #[test]
    fn test_empty() {
        let tokens = tokenize("");
        assert_eq!(tokens, vec![Token::new(TokenKind::Eof, "", Position::new(0, 1, 1))]);
    }

    #[test]
    fn simple_object() {
        let tokens = tokenize(r#"{"a":1}"#);
        let expected = vec![
            Token::new(TokenKind::LeftBrace, "{", Position::new(0, 1, 1)),
            Token::new(TokenKind::QuotedString, "\"a\"", Position::new(1, 1, 2)),
            Token::new(TokenKind::Colon, ":", Position::new(4, 1, 5)),
            Token::new(TokenKind::DecimalNumber, "1", Position::new(5, 1, 6)),
            Token::new(TokenKind::RightBrace, "}", Position::new(6, 1, 7)),
            Token::new(TokenKind::Eof, "", Position::new(7, 1, 8)),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind(), TokenKind::UnquotedString);
        let eof = lexer.next_token();
        assert!(eof.is_eof());
        assert_eq!(lexer.next_token(), eof);
        assert_eq!(lexer.next_token(), eof);
    }

    #[test]
    fn iterator_stops_after_eof() {
        let mut lexer = Lexer::new("[]");
        assert_eq!(lexer.by_ref().count(), 3);
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_literals() {
        let source = "true false null Infinity NaN nullable $id _x1";
        let kinds: Vec<TokenKind> =
            tokenize(source).iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Boolean,
                TokenKind::Boolean,
                TokenKind::Null,
                TokenKind::Infinity,
                TokenKind::NaN,
                TokenKind::UnquotedString,
                TokenKind::UnquotedString,
                TokenKind::UnquotedString,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_variants() {
        let cases = [
            ("0", TokenKind::DecimalNumber),
            ("-0", TokenKind::DecimalNumber),
            ("+1", TokenKind::DecimalNumber),
            ("123", TokenKind::DecimalNumber),
            ("3.14", TokenKind::DecimalNumber),
            (".5", TokenKind::DecimalNumber),
            ("5.", TokenKind::DecimalNumber),
            ("0.001e-10", TokenKind::DecimalNumber),
            ("1E+3", TokenKind::DecimalNumber),
            ("0xFF", TokenKind::HexNumber),
            ("0XdeadBEEF", TokenKind::HexNumber),
            ("-0x1", TokenKind::HexNumber),
            ("-Infinity", TokenKind::Infinity),
            ("+NaN", TokenKind::NaN),
        ];
        for (source, kind) in cases {
            let tokens = tokenize(source);
            assert_eq!(tokens.len(), 2, "source {source:?}: {tokens:?}");
            assert_eq!(tokens[0].kind(), kind, "source {source:?}");
            assert_eq!(tokens[0].literal(), source);
            assert!(tokens[1].is_eof());
        }
    }

    #[test]
    fn malformed_numbers_are_illegal() {
        for source in ["-", "+", ".", "0x", "1e", "1e+", "-foo"] {
            let tokens = tokenize(source);
            assert_eq!(tokens[0].kind(), TokenKind::Illegal, "source {source:?}");
            assert_eq!(tokens[0].literal(), source);
        }
    }

    #[test]
    fn number_followed_by_identifier_splits() {
        let tokens = tokenize("12ab");
        assert_eq!(tokens[0].literal(), "12");
        assert_eq!(tokens[1].kind(), TokenKind::UnquotedString);
        assert_eq!(tokens[1].literal(), "ab");
    }

    #[test]
    fn test_escape_sequences() {
        let cases = [
            (r#""Test \"quoted\" text""#, "\"Test \"quoted\" text\""),
            (r#""Backslash: \\""#, "\"Backslash: \\\""),
            (r#""Forward slash: \/""#, "\"Forward slash: /\""),
            (r#""Backspace: \b""#, "\"Backspace: \u{8}\""),
            (r#""Form feed: \f""#, "\"Form feed: \u{c}\""),
            (r#""Newline: \n""#, "\"Newline: \n\""),
            (r#""Carriage return: \r""#, "\"Carriage return: \r\""),
            (r#""Tab: \t""#, "\"Tab: \t\""),
            (r#""Unicode: A\U0042C""#, "\"Unicode: ABC\""),
            (r#"'It\'s'"#, "'It's'"),
            (r#""Pair: \uD83D\uDE00""#, "\"Pair: \u{1F600}\""),
        ];

        for (source, literal) in cases {
            let tokens = tokenize(source);
            assert_eq!(tokens.len(), 2, "source {source:?}");
            assert_eq!(tokens[0].kind(), TokenKind::QuotedString);
            assert_eq!(tokens[0].literal(), literal);
        }
    }

    #[test]
    fn invalid_escape_is_kept_verbatim() {
        let tokens = tokenize(r#""a\qb\0""#);
        assert_eq!(tokens[0].kind(), TokenKind::QuotedString);
        assert_eq!(tokens[0].literal(), r#""a\qb\0""#);
    }

    #[test]
    fn line_continuation_contributes_nothing() {
        for source in ["'ab\\\ncd'", "'ab\\\r\ncd'", "'ab\\\u{2028}cd'"] {
            let tokens = tokenize(source);
            assert_eq!(tokens[0].kind(), TokenKind::QuotedString, "{source:?}");
            assert_eq!(tokens[0].literal(), "'abcd'");
            assert_eq!(tokens[1].line(), 2);
            assert_eq!(tokens[1].column(), 4);
        }
    }

    #[test]
    fn unterminated_strings_are_illegal() {
        let tokens = tokenize("\"abc");
        assert_eq!(tokens[0].kind(), TokenKind::Illegal);
        assert_eq!(tokens[0].literal(), "\"abc");
        assert!(tokens[1].is_eof());

        let tokens = tokenize("'abc\n, 1");
        assert_eq!(tokens[0].kind(), TokenKind::Illegal);
        assert_eq!(tokens[0].literal(), "'abc");
        assert_eq!(tokens[1].kind(), TokenKind::Comma);
        assert_eq!((tokens[1].line(), tokens[1].column()), (2, 1));
        assert_eq!(tokens[2].literal(), "1");
    }

    #[test]
    fn bad_unicode_escape_recovers_after_string() {
        let tokens = tokenize(r#"["\u12", "\uD800x", 1]"#);
        let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftBracket,
                TokenKind::Illegal,
                TokenKind::Comma,
                TokenKind::Illegal,
                TokenKind::Comma,
                TokenKind::DecimalNumber,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].literal(), r#""\u12""#);
    }

    #[test]
    fn comments() {
        let tokens = tokenize("// to eol\n/* multi\nline */ // at eof");
        assert_eq!(tokens[0].kind(), TokenKind::LineComment);
        assert_eq!(tokens[0].literal(), "// to eol");
        assert_eq!(tokens[1].kind(), TokenKind::BlockComment);
        assert_eq!(tokens[1].literal(), "/* multi\nline */");
        assert_eq!((tokens[1].line(), tokens[1].column()), (2, 1));
        assert_eq!(tokens[2].kind(), TokenKind::LineComment);
        assert_eq!((tokens[2].line(), tokens[2].column()), (3, 9));
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn multiline_literals_ignore_crlf() {
        for (source, literal) in [
            ("/* a\nb */ 1", "/* a\nb */"),
            ("'\\\n", "'\\\n"),
            ("/* open\n", "/* open\n"),
        ] {
            let lf = tokenize(source);
            let crlf = tokenize(&source.replace('\n', "\r\n"));
            assert_eq!(lf[0].literal(), literal, "source {source:?}");
            assert_eq!(summarize(source), summarize(&source.replace('\n', "\r\n")));
            assert_eq!(crlf[0].literal(), literal, "source {source:?}");
        }
    }

    #[test]
    fn malformed_comments_are_illegal() {
        let tokens = tokenize("/ 1");
        assert_eq!(tokens[0].kind(), TokenKind::Illegal);
        assert_eq!(tokens[0].literal(), "/");
        assert_eq!(tokens[1].literal(), "1");

        let tokens = tokenize("/* never closed */");
        assert_eq!(tokens[0].kind(), TokenKind::BlockComment);

        let tokens = tokenize("/* never closed");
        assert_eq!(tokens[0].kind(), TokenKind::Illegal);
        assert_eq!(tokens[0].literal(), "/* never closed");
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn unrecognized_characters_are_illegal() {
        let tokens = tokenize("{ # }");
        assert_eq!(tokens[1].kind(), TokenKind::Illegal);
        assert_eq!(tokens[1].literal(), "#");
        assert_eq!(tokens[1].offset(), 2);
        assert_eq!(tokens[2].kind(), TokenKind::RightBrace);

        let tokens = tokenize("\0");
        assert_eq!(tokens[0].kind(), TokenKind::Illegal);
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn columns_count_characters() {
        let tokens = tokenize("'é', 1");
        assert_eq!(tokens[1].column(), 4);
        assert_eq!(tokens[1].offset(), 4);
        assert_eq!(tokens[2].column(), 6);
    }

    #[test]
    fn unicode_line_separators() {
        let tokens = tokenize("1\u{2028}2\u{2029}3");
        let lines: Vec<usize> = tokens.iter().map(Token::line).collect();
        assert_eq!(lines, vec![1, 2, 3, 3]);
    }

    proptest! {
        #[test]
        fn tokens_cover_source(
            source in r#"[{}\[\],:"'/*\\a-zA-Z0-9_$.+\-xeE \t\n\r\u{2028}#é]{0,64}"#
        ) {
            let tokens = tokenize(&source);
            prop_assert!(tokens.len() <= source.len() + 1);

            let eof = tokens.last().unwrap();
            prop_assert!(eof.is_eof());
            prop_assert_eq!(eof.offset(), source.len());

            for pair in tokens.windows(2) {
                let (tok, next) = (&pair[0], &pair[1]);
                prop_assert!(tok.offset() < next.offset());
                if tok.kind() == TokenKind::QuotedString {
                    continue;
                }
                // literal, then whitespace, up to the next token
                let span = source[tok.offset()..next.offset()].replace("\r\n", "\n");
                let rest = span.strip_prefix(tok.literal());
                prop_assert!(rest.is_some(), "{:?} does not start {:?}", tok, span);
                prop_assert!(rest.unwrap_or_default().chars().all(is_whitespace));
            }
        }

        #[test]
        fn crlf_matches_lf(source in r#"[{}\[\],:'a-z0-9 \n\\/*]{0,48}"#) {
            let crlf = source.replace('\n', "\r\n");
            let lf: Vec<_> = summarize(&source);
            let crlf: Vec<_> = summarize(&crlf);
            prop_assert_eq!(lf, crlf);
        }
    }
}
