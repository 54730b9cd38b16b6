// src/errors/parser.rs
//! Parser errors (E1xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use super::LexerError;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ParserError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexer(#[from] LexerError),

    #[error("expected {expected}, found '{found}'")]
    #[diagnostic(code(E1001))]
    ExpectedToken {
        expected: String,
        found: String,
        #[label("unexpected token")]
        span: SourceSpan,
    },

    #[error("expected a type, found '{found}'")]
    #[diagnostic(
        code(E1002),
        help("a type is a name, a template instance, or a signature like '(x: int) -> void'")
    )]
    ExpectedType {
        found: String,
        #[label("expected type")]
        span: SourceSpan,
    },

    #[error("duplicate function modifier '{modifier}'")]
    #[diagnostic(code(E1003))]
    DuplicateModifier {
        modifier: String,
        #[label("already specified")]
        span: SourceSpan,
    },

    #[error("unknown function modifier '{modifier}'")]
    #[diagnostic(
        code(E1004),
        help("function modifiers are 'const', 'noexcept' and 'off_thread'")
    )]
    UnknownModifier {
        modifier: String,
        #[label("not a function modifier")]
        span: SourceSpan,
    },

    #[error("'{modifier}' cannot follow a reference")]
    #[diagnostic(code(E1005), help("place '&' or '&&' after every 'const' and '*'"))]
    ModifierAfterReference {
        modifier: String,
        #[label("modifier after reference")]
        span: SourceSpan,
    },

    #[error("unexpected '{found}' after complete type")]
    #[diagnostic(code(E1006))]
    TrailingInput {
        found: String,
        #[label("expected end of input")]
        span: SourceSpan,
    },
}
