// src/errors.rs
//! Normalization errors (E4xxx).
//!
//! A normalization error is scoped to one entity: it names the table entry and
//! the field whose value was malformed.

use std::fmt;

use hostbind_frontend::ParseError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeErrorKind {
    #[error("invalid type expression \"{}\"", .0.input)]
    TypeParse(ParseError),

    #[error("expected a function signature, found \"{found}\"")]
    ExpectedFunction { found: String },

    #[error("constructors may not declare a return type, found \"{found}\"")]
    ConstructorReturnType { found: String },

    #[error("more than one overload omits 'suffix'")]
    UnsuffixedOverloads,

    #[error("suffix '{suffix}' is used by more than one overload")]
    DuplicateSuffix { suffix: String },

    #[error("enumerator '{name}' is listed more than once")]
    DuplicateEnumerator { name: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{entity}, {field}: {kind}")]
pub struct NormalizeError {
    /// e.g. `class 'Realm'`
    pub entity: String,
    /// e.g. `method 'open'`
    pub field: String,
    pub kind: NormalizeErrorKind,
}

impl NormalizeError {
    pub fn new(entity: impl Into<String>, field: impl Into<String>, kind: NormalizeErrorKind) -> Self {
        Self {
            entity: entity.into(),
            field: field.into(),
            kind,
        }
    }

    /// The underlying parse failure, if that is what went wrong.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match &self.kind {
            NormalizeErrorKind::TypeParse(err) => Some(err),
            _ => None,
        }
    }
}

impl Diagnostic for NormalizeError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: &'static str = match &self.kind {
            NormalizeErrorKind::TypeParse(_) => "E4001",
            NormalizeErrorKind::ExpectedFunction { .. } => "E4002",
            NormalizeErrorKind::ConstructorReturnType { .. } => "E4003",
            NormalizeErrorKind::UnsuffixedOverloads => "E4004",
            NormalizeErrorKind::DuplicateSuffix { .. } => "E4005",
            NormalizeErrorKind::DuplicateEnumerator { .. } => "E4006",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &'static str = match &self.kind {
            NormalizeErrorKind::ConstructorReturnType { .. } => {
                "the return type of a constructor is always the class; omit '-> ...'"
            }
            NormalizeErrorKind::UnsuffixedOverloads | NormalizeErrorKind::DuplicateSuffix { .. } => {
                "give every overload but one a distinct 'suffix'"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        self.parse_error().map(|err| err as &dyn Diagnostic)
    }
}
