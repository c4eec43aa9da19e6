//! # JSON5 Path Expressions
//!
//! A small addressing language for locating values inside a JSON5 document:
//! - Dotted keys, e.g. `foo.bar`
//! - Bracketed indices, e.g. `items[3]`
//! - Quoted keys in brackets, e.g. `["0"]` or `['key']`
//! - An optional leading root marker `$`
//!
//! Parse failures carry the exact offset of the offending character and can
//! be rendered with a caret under it, see [`PathError::annotate`].

pub mod model;
pub mod parser;
pub mod segment;

/// The root marker. Recognized at the start of a path, never stored.
pub const ROOT: &str = "$";

// Re-exports
pub use model::Path;
pub use parser::{PathError, parse_path};
pub use segment::{IntoSegment, Segment, SegmentError};
