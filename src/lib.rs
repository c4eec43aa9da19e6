/*!
# `json5kit` Library

Provides means of scanning JSON5 text and addressing values inside JSON5
documents.

- [`tokenizer`]: a lexer turning JSON5 source into position-annotated tokens
- [`path`]: path expressions such as `$.foo.bar[3]`, their parser and model
- [`ast`]: the document node shape, navigable with a [`path::Path`]
*/

pub mod ast;
pub mod commands;
pub mod path;
pub mod tokenizer;
pub mod utils;
