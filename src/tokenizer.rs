//! # Tokenizer/ Lexer
//!
//! Scans JSON5 source text into a stream of position-annotated tokens.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{Lexer, tokenize};
pub use token::{Position, Token, TokenKind, lookup_keyword};
