/*!
# Path Value and Builder

Defines [`Path`], an ordered list of [`Segment`]s locating a value inside a
document, together with the [`path!`](crate::path!) macro for building one
from mixed keys and indices.

# Examples

```
use json5kit::path;
use json5kit::path::{Path, Segment};

let built: Path = path!["foo", "bar", 3, "baz"].expect("valid segments");
let parsed: Path = "foo.bar[3].baz".parse().expect("valid path");
assert_eq!(built, parsed);
assert_eq!(built.to_string(), "foo.bar[3].baz");
```
*/
use serde::Serialize;
use std::{fmt::Display, str::FromStr};

use super::{PathError, ROOT, Segment, parse_path};
use crate::tokenizer::lexer::{is_identifier_part, is_identifier_start};

/// An ordered sequence of segments, read from the document root outwards.
///
/// The root marker `$` is never stored: `$.foo` and `foo` are the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a path from already-typed segments, dropping a leading root
    /// marker key.
    #[must_use]
    pub fn new(mut segments: Vec<Segment>) -> Self {
        if segments.first().and_then(Segment::as_key) == Some(ROOT) {
            // Don't actually store the root segment
            segments.remove(0);
        }
        Self { segments }
    }

    /// Wraps segments produced by the parser, which has already consumed the
    /// root marker.
    pub(super) const fn from_parsed(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parse a path expression.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if `source` is not a valid path expression.
    pub fn parse(source: &str) -> Result<Self, PathError> {
        parse_path(source)
    }

    /// The segments, in addressing order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the path, returning its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Iterates over the segments, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Inserts `segments` in front of the existing ones, keeping their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use json5kit::path::{Path, Segment};
    /// let mut path: Path = "baz".parse().unwrap();
    /// path.prepend([Segment::key("foo"), Segment::index(2)]);
    /// assert_eq!(path.to_string(), "foo[2].baz");
    /// ```
    pub fn prepend(&mut self, segments: impl IntoIterator<Item = Segment>) -> &mut Self {
        let tail = std::mem::take(&mut self.segments);
        self.segments.extend(segments);
        self.segments.extend(tail);
        self
    }

    /// Adds `segments` after the existing ones.
    pub fn append(&mut self, segments: impl IntoIterator<Item = Segment>) -> &mut Self {
        self.segments.extend(segments);
        self
    }

    /// Adds a single segment at the end.
    pub fn push(&mut self, segment: Segment) -> &mut Self {
        self.segments.push(segment);
        self
    }
}

impl Display for Path {
    /// Renders the canonical form: the first key bare, later keys as `.key`
    /// and indices as `[n]` with no separator. Keys that could not be read
    /// back bare are written as `["key"]`, with `"`, `\\` and control
    /// characters escaped.
    ///
    /// Only keys made of identifier characters read back through
    /// [`Path::parse`]; the path grammar has no escapes, so a key such as
    /// `with space` renders unambiguously but does not parse.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if needs_brackets(key, i == 0) => {
                    write!(f, "[\"")?;
                    write_escaped(f, key)?;
                    write!(f, "\"]")?;
                }
                Segment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{key}")?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Returns `true` if a key cannot be written as a bare identifier. A leading
/// `$` on its own would read back as the root marker.
fn needs_brackets(key: &str, first: bool) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        None => true,
        Some(c) if !is_identifier_start(c) => true,
        Some(_) if first && key == ROOT => true,
        Some(_) => !chars.all(is_identifier_part),
    }
}

/// Writes `key` with quotes, backslashes and control characters escaped.
fn write_escaped(f: &mut std::fmt::Formatter<'_>, key: &str) -> std::fmt::Result {
    for c in key.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c if c.is_control() => write!(f, "\\u{:04x}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Builds a [`Path`] from a list of keys and indices.
///
/// Each element goes through [`IntoSegment`](crate::path::IntoSegment), so
/// strings become keys and integers become indices. Evaluates to
/// `Result<Path, SegmentError>`.
///
/// ```
/// use json5kit::path;
/// let p = path!["$", "items", 0u8, "name"].unwrap();
/// assert_eq!(p.to_string(), "items[0].name");
/// assert!(path!["items", -1].is_err());
/// ```
#[macro_export]
macro_rules! path {
    ($($segment: expr),* $(,)?) => {
        (|| -> ::core::result::Result<$crate::path::Path, $crate::path::SegmentError> {
            ::core::result::Result::Ok($crate::path::Path::new(vec![
                $($crate::path::IntoSegment::into_segment($segment)?),*
            ]))
        })()
    };
}
