/*!
# Path Segments

A [`Segment`] is one addressing step into a document: either an object member
key or an array index.

Segments are built from already-typed values through the [`IntoSegment`]
trait. Strings become keys and integers become indices; anything that cannot
denote a valid index is rejected with a [`SegmentError`]. Downstream types
can opt in by implementing [`IntoSegment`] themselves.
*/
use serde::Serialize;
use std::error::Error;
use std::fmt;

/// One step of a [`Path`](crate::path::Path).
#[derive(Hash, PartialEq, Eq, Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// Object member access, e.g. `foo` or `["foo"]`
    Key(String),
    /// Array element access, e.g. `[3]`
    Index(usize),
}

impl Segment {
    /// Helper for ergonomic construction of key segments
    pub fn key<T: Into<String>>(name: T) -> Self {
        Self::Key(name.into())
    }

    /// Helper for construction of index segments
    #[must_use]
    pub const fn index(index: usize) -> Self {
        Self::Index(index)
    }

    #[must_use]
    pub const fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// Returns the key, if this is a key segment.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns the index, if this is an index segment.
    #[must_use]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Key(_) => None,
            Self::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Errors raised when a value cannot be turned into a [`Segment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// An integer that does not fit a non-negative index, e.g. `-1`
    OutOfRange(String),
    /// A float that is not a whole, finite, non-negative number, e.g. `1.5`
    InvalidIndex(String),
}

impl Error for SegmentError {}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(value) => {
                write!(f, "index out of range: {value}")
            }
            Self::InvalidIndex(value) => {
                write!(f, "invalid index: {value}")
            }
        }
    }
}

/// Conversion into a [`Segment`].
///
/// Implemented for string types (keys), every fixed-width integer type and
/// `f32`/`f64` (indices), and segments themselves. Implement it for your own
/// key-like or index-like types to use them with [`path!`](crate::path!).
pub trait IntoSegment {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns a [`SegmentError`] if the value does not denote a valid key or
    /// index.
    fn into_segment(self) -> Result<Segment, SegmentError>;
}

impl IntoSegment for Segment {
    fn into_segment(self) -> Result<Segment, SegmentError> {
        Ok(self)
    }
}

impl IntoSegment for &Segment {
    fn into_segment(self) -> Result<Segment, SegmentError> {
        Ok(self.clone())
    }
}

impl IntoSegment for &str {
    fn into_segment(self) -> Result<Segment, SegmentError> {
        Ok(Segment::key(self))
    }
}

impl IntoSegment for String {
    fn into_segment(self) -> Result<Segment, SegmentError> {
        Ok(Segment::Key(self))
    }
}

impl IntoSegment for &String {
    fn into_segment(self) -> Result<Segment, SegmentError> {
        Ok(Segment::key(self.as_str()))
    }
}

impl IntoSegment for char {
    fn into_segment(self) -> Result<Segment, SegmentError> {
        Ok(Segment::Key(self.to_string()))
    }
}

macro_rules! impl_integer_segment {
    ($($ty:ty),*) => {
        $(
            impl IntoSegment for $ty {
                fn into_segment(self) -> Result<Segment, SegmentError> {
                    usize::try_from(self)
                        .map(Segment::Index)
                        .map_err(|_| SegmentError::OutOfRange(self.to_string()))
                }
            }
        )*
    };
}

impl_integer_segment!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_segment {
    ($($ty:ty),*) => {
        $(
            impl IntoSegment for $ty {
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                fn into_segment(self) -> Result<Segment, SegmentError> {
                    if !self.is_finite()
                        || self.fract() != 0.0
                        || self < 0.0
                        || self >= usize::MAX as $ty
                    {
                        return Err(SegmentError::InvalidIndex(self.to_string()));
                    }
                    Ok(Segment::Index(self as usize))
                }
            }
        )*
    };
}

impl_float_segment!(f32, f64);
