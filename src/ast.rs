/*!
# JSON5 Document Tree

Defines the node types a grammar-level parser builds from the token stream,
and navigation of a built tree with a [`Path`].

Every node carries the [`Position`] of the token it came from and, once it
has a parent, the [`Segment`] that reaches it from that parent. Parents own
their children; there are no back-references.

# Examples

```
use json5kit::ast::{ArrayNode, Node, ObjectNode};
use json5kit::path::Path;
use json5kit::tokenizer::{Position, tokenize};

let tokens = tokenize("'hello'");
let leaf = Node::from_token(&tokens[0]).expect("value token");

let mut items = ArrayNode::new(Position::default());
items.push(leaf);
let mut root = ObjectNode::new(Position::default());
root.insert("items", Node::Array(items));
let root = Node::Object(root);

let path: Path = "items[0]".parse().unwrap();
let found = root.get(&path).and_then(Node::as_string).unwrap();
assert_eq!(found.value(), "hello");
assert_eq!(found.quote(), Some('\''));
```
*/
use indexmap::IndexMap;
use std::error::Error;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use crate::path::{Path, Segment};
use crate::tokenizer::{Position, Token, TokenKind};

/// The kind of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    Infinity,
    NaN,
    Comment,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "Object",
            Self::Array => "Array",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Null => "null",
            Self::Infinity => "Infinity",
            Self::NaN => "NaN",
            Self::Comment => "Comment",
        };
        f.write_str(name)
    }
}

/// Where a node sits: its source position and how its parent reaches it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Origin {
    /// Position of the token the node was built from
    position: Position,
    /// Key or index under which the parent holds this node, `None` for a root
    segment: Option<Segment>,
}

impl Origin {
    const fn at(position: Position) -> Self {
        Self {
            position,
            segment: None,
        }
    }
}

/// A node in a JSON5 document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(ObjectNode),
    Array(ArrayNode),
    String(StringNode),
    Number(NumberNode),
    Boolean(BooleanNode),
    Null(NullNode),
    Infinity(InfinityNode),
    NaN(NaNNode),
    Comment(CommentNode),
}

impl Node {
    /// Builds a leaf node from a value or comment token. Structural, illegal
    /// and end-of-input tokens have no node and yield `None`.
    #[must_use]
    pub fn from_token(token: &Token) -> Option<Self> {
        let position = token.position();
        let literal = token.literal();
        let node = match token.kind() {
            TokenKind::QuotedString | TokenKind::UnquotedString => {
                Self::String(StringNode::from_literal(literal, position))
            }
            TokenKind::DecimalNumber | TokenKind::HexNumber => {
                Self::Number(NumberNode::new(literal, position))
            }
            TokenKind::Boolean => {
                Self::Boolean(BooleanNode::new(literal == "true", position))
            }
            TokenKind::Null => Self::Null(NullNode::new(position)),
            TokenKind::Infinity => {
                Self::Infinity(InfinityNode::new(literal.starts_with('-'), position))
            }
            TokenKind::NaN => Self::NaN(NaNNode::new(position)),
            TokenKind::LineComment | TokenKind::BlockComment => {
                Self::Comment(CommentNode::new(literal, position))
            }
            TokenKind::Illegal
            | TokenKind::Eof
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::LeftBracket
            | TokenKind::RightBracket
            | TokenKind::Comma
            | TokenKind::Colon => return None,
        };
        Some(node)
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::String(_) => NodeKind::String,
            Self::Number(_) => NodeKind::Number,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::Null(_) => NodeKind::Null,
            Self::Infinity(_) => NodeKind::Infinity,
            Self::NaN(_) => NodeKind::NaN,
            Self::Comment(_) => NodeKind::Comment,
        }
    }

    const fn origin(&self) -> &Origin {
        match self {
            Self::Object(n) => &n.origin,
            Self::Array(n) => &n.origin,
            Self::String(n) => &n.origin,
            Self::Number(n) => &n.origin,
            Self::Boolean(n) => &n.origin,
            Self::Null(n) => &n.origin,
            Self::Infinity(n) => &n.origin,
            Self::NaN(n) => &n.origin,
            Self::Comment(n) => &n.origin,
        }
    }

    const fn origin_mut(&mut self) -> &mut Origin {
        match self {
            Self::Object(n) => &mut n.origin,
            Self::Array(n) => &mut n.origin,
            Self::String(n) => &mut n.origin,
            Self::Number(n) => &mut n.origin,
            Self::Boolean(n) => &mut n.origin,
            Self::Null(n) => &mut n.origin,
            Self::Infinity(n) => &mut n.origin,
            Self::NaN(n) => &mut n.origin,
            Self::Comment(n) => &mut n.origin,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.origin().position
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.origin().position.offset
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.origin().position.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.origin().position.column
    }

    /// The key or index under which the parent holds this node.
    #[must_use]
    pub const fn segment(&self) -> Option<&Segment> {
        self.origin().segment.as_ref()
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Self::Object(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            Self::Array(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_string(&self) -> Option<&StringNode> {
        match self {
            Self::String(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<&NumberNode> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Steps into a child: a member for a key, an element for an index.
    #[must_use]
    pub fn child(&self, segment: &Segment) -> Option<&Self> {
        match (self, segment) {
            (Self::Object(object), Segment::Key(key)) => object.get(key),
            (Self::Array(array), Segment::Index(index)) => array.get(*index),
            _ => None,
        }
    }

    /// Follows `path` from this node, returning the node it addresses.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&Self> {
        path.iter().try_fold(self, |node, segment| node.child(segment))
    }

    /// Compute the depth of the tree rooted at this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(object) => {
                1 + object.iter().map(|(_, v)| v.depth()).max().unwrap_or(0)
            }
            Self::Array(array) => {
                1 + array.iter().map(Self::depth).max().unwrap_or(0)
            }
            _ => 1,
        }
    }
}

/// An object: unique keys mapped to child nodes, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectNode {
    origin: Origin,
    members: IndexMap<String, Node>,
}

impl ObjectNode {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            origin: Origin::at(position),
            members: IndexMap::new(),
        }
    }

    /// Adds a member, recording `key` as the child's segment. Returns the
    /// member previously stored under `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, mut node: Node) -> Option<Node> {
        let key = key.into();
        node.origin_mut().segment = Some(Segment::Key(key.clone()));
        self.members.insert(key, node)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.members.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// An array: an ordered list of child nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayNode {
    origin: Origin,
    elements: Vec<Node>,
}

impl ArrayNode {
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            origin: Origin::at(position),
            elements: Vec::new(),
        }
    }

    /// Appends an element, recording its index as the child's segment.
    pub fn push(&mut self, mut node: Node) {
        node.origin_mut().segment = Some(Segment::Index(self.elements.len()));
        self.elements.push(node);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.elements.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.elements.iter()
    }
}

/// A string value or an unquoted object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringNode {
    origin: Origin,
    value: String,
    quote: Option<char>,
}

impl StringNode {
    /// Builds a string node from a token literal, stripping the surrounding
    /// quotes if present.
    #[must_use]
    pub fn from_literal(literal: &str, position: Position) -> Self {
        let quote = literal.chars().next().filter(|c| matches!(c, '"' | '\''));
        let value = match quote {
            Some(q) if literal.len() >= 2 && literal.ends_with(q) => &literal[1..literal.len() - 1],
            _ => literal,
        };
        Self {
            origin: Origin::at(position),
            value: value.to_string(),
            quote,
        }
    }

    /// The decoded string, without quotes.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The quote character the string was written with, `None` for bare
    /// identifiers.
    #[must_use]
    pub const fn quote(&self) -> Option<char> {
        self.quote
    }
}

/// Errors raised when converting a number literal to a native value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// The literal does not fit an `i64`, or is not an integer
    InvalidInteger {
        raw: String,
        source: ParseIntError,
    },
    /// The literal is not a valid `f64`
    InvalidFloat {
        raw: String,
        source: ParseFloatError,
    },
}

impl Error for NumberError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInteger { source, .. } => Some(source),
            Self::InvalidFloat { source, .. } => Some(source),
        }
    }
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInteger { raw, source } => {
                write!(f, "invalid integer {raw:?}: {source}")
            }
            Self::InvalidFloat { raw, source } => {
                write!(f, "invalid float {raw:?}: {source}")
            }
        }
    }
}

/// A native numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// A number, kept as its literal text until converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberNode {
    origin: Origin,
    raw: String,
}

impl NumberNode {
    #[must_use]
    pub fn new(raw: impl Into<String>, position: Position) -> Self {
        Self {
            origin: Origin::at(position),
            raw: raw.into(),
        }
    }

    /// The literal text, e.g. `-0x1F` or `.5`.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_hex(&self) -> bool {
        self.split_hex().is_some()
    }

    /// Splits a hex literal into its sign and digits.
    fn split_hex(&self) -> Option<(&str, &str)> {
        let (sign, rest) = match self.raw.as_bytes().first() {
            Some(b'+' | b'-') => self.raw.split_at(1),
            _ => ("", self.raw.as_str()),
        };
        rest.strip_prefix("0x")
            .or_else(|| rest.strip_prefix("0X"))
            .map(|digits| (sign, digits))
    }

    /// Converts to an `i64`.
    ///
    /// # Errors
    ///
    /// Returns a [`NumberError`] if the literal has a fraction or exponent,
    /// or does not fit an `i64`.
    pub fn as_i64(&self) -> Result<i64, NumberError> {
        let parsed = match self.split_hex() {
            Some((sign, digits)) => i64::from_str_radix(&format!("{sign}{digits}"), 16),
            None => self.raw.parse::<i64>(),
        };
        parsed.map_err(|source| NumberError::InvalidInteger {
            raw: self.raw.clone(),
            source,
        })
    }

    /// Converts to an `f64`.
    ///
    /// # Errors
    ///
    /// Returns a [`NumberError`] if the literal is not a valid float, or is
    /// a hex literal that does not fit an `i64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Result<f64, NumberError> {
        if self.is_hex() {
            return self.as_i64().map(|n| n as f64);
        }
        self.raw.parse::<f64>().map_err(|source| NumberError::InvalidFloat {
            raw: self.raw.clone(),
            source,
        })
    }

    /// Converts to a float when the literal contains a `.`, otherwise to an
    /// integer. An exponent alone does not make a float: `1e3` fails here
    /// and converts with [`as_f64`](Self::as_f64) instead.
    ///
    /// # Errors
    ///
    /// Returns a [`NumberError`] if the chosen conversion fails.
    pub fn value(&self) -> Result<Number, NumberError> {
        if self.raw.contains('.') {
            self.as_f64().map(Number::Float)
        } else {
            self.as_i64().map(Number::Integer)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanNode {
    origin: Origin,
    value: bool,
}

impl BooleanNode {
    #[must_use]
    pub const fn new(value: bool, position: Position) -> Self {
        Self {
            origin: Origin::at(position),
            value,
        }
    }

    #[must_use]
    pub const fn value(&self) -> bool {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullNode {
    origin: Origin,
}

impl NullNode {
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            origin: Origin::at(position),
        }
    }
}

/// `Infinity`, `+Infinity` or `-Infinity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfinityNode {
    origin: Origin,
    negative: bool,
}

impl InfinityNode {
    #[must_use]
    pub const fn new(negative: bool, position: Position) -> Self {
        Self {
            origin: Origin::at(position),
            negative,
        }
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        if self.negative { f64::NEG_INFINITY } else { f64::INFINITY }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaNNode {
    origin: Origin,
}

impl NaNNode {
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            origin: Origin::at(position),
        }
    }
}

/// A line or block comment, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    origin: Origin,
    text: String,
}

impl CommentNode {
    #[must_use]
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            origin: Origin::at(position),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_block(&self) -> bool {
        self.text.starts_with("/*")
    }
}
