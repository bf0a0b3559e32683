//! Tokenizer and parser for executable GraphQL documents.
//!
//! This crate handles the language half of a GraphQL server: it turns query
//! source text into an owned AST of operations and fragments, and checks the
//! document-level naming rules (operation and fragment uniqueness, synthetic
//! names for anonymous operations).
//!
//! Only the executable grammar is supported: operation definitions, fragment
//! definitions, selection sets, arguments, directives and values. Type system
//! definitions belong to the schema side of the engine, which derives them
//! from registered Rust types instead of SDL.
//!
//! ```rust
//! use reflectql_parser::parse_query_and_check_names;
//!
//! let (fragments, operations, errors) = parse_query_and_check_names(
//!     "query Todos { todos { id title } }",
//! );
//! assert!(errors.is_empty());
//! assert!(operations.contains_key("Todos"));
//! assert!(fragments.is_empty());
//! ```

pub mod ast;
mod error;
mod lexer;
mod limit;
mod names;
mod parser;

pub use crate::error::Error;
pub use crate::lexer::Lexer;
pub use crate::lexer::Token;
pub use crate::lexer::TokenKind;
pub use crate::limit::LimitTracker;
pub use crate::names::check_names;
pub use crate::names::parse_query_and_check_names;
pub use crate::parser::Parser;
