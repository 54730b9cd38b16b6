// src/errors/mod.rs
//! Diagnostics for the type-expression frontend.

pub mod lexer;
pub mod parser;

pub use lexer::LexerError;
pub use parser::ParserError;
