// src/errors.rs
//! Code generation errors.
//!
//! Error code ranges:
//! - E0xxx: Lexer errors
//! - E1xxx: Parser errors
//! - E2xxx: Binder errors
//! - E3xxx: Codegen errors (this module)
//! - E4xxx: Normalizer errors

use std::fmt;
use std::path::PathBuf;

use hostbind_sema::SpellingError;
use miette::Diagnostic;
use thiserror::Error;

/// The kind of code generation error.
#[derive(Debug, Clone, PartialEq)]
pub enum CodegenErrorKind {
    /// A template with no conversion rule
    UnsupportedTemplate { name: String },

    /// A template instance without the argument a rule needs
    MissingTemplateArgument {
        template: String,
        index: usize,
        found: usize,
    },

    /// A record holding a function type, converted towards the host
    OneWayRecord { record: String },

    /// A type with no native spelling
    Spelling(SpellingError),

    /// A backend rejected something it cannot emit
    Backend { message: String },

    /// Writing an output file failed
    Output { path: PathBuf, message: String },

    /// Two writes to the same output path in one run
    DuplicateOutput { path: PathBuf },
}

/// Code generation error, tagged with the backend that raised it once known.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}{kind}", backend_prefix(.backend))]
pub struct CodegenError {
    pub kind: CodegenErrorKind,
    pub backend: Option<String>,
}

pub type CodegenResult<T> = Result<T, CodegenError>;

impl CodegenError {
    pub fn unsupported_template(name: impl Into<String>) -> Self {
        CodegenErrorKind::UnsupportedTemplate { name: name.into() }.into()
    }

    pub fn missing_template_argument(template: impl Into<String>, index: usize, found: usize) -> Self {
        CodegenErrorKind::MissingTemplateArgument {
            template: template.into(),
            index,
            found,
        }
        .into()
    }

    pub fn one_way_record(record: impl Into<String>) -> Self {
        CodegenErrorKind::OneWayRecord {
            record: record.into(),
        }
        .into()
    }

    pub fn backend(message: impl Into<String>) -> Self {
        CodegenErrorKind::Backend {
            message: message.into(),
        }
        .into()
    }

    pub fn output(path: impl Into<PathBuf>, e: impl fmt::Display) -> Self {
        CodegenErrorKind::Output {
            path: path.into(),
            message: e.to_string(),
        }
        .into()
    }

    pub fn duplicate_output(path: impl Into<PathBuf>) -> Self {
        CodegenErrorKind::DuplicateOutput { path: path.into() }.into()
    }

    /// Attach the name of the backend this error came from, keeping the first.
    pub fn in_backend(mut self, name: &str) -> Self {
        if self.backend.is_none() {
            self.backend = Some(name.to_string());
        }
        self
    }
}

fn backend_prefix(backend: &Option<String>) -> String {
    match backend {
        Some(name) => format!("backend '{}': ", name),
        None => String::new(),
    }
}

impl From<CodegenErrorKind> for CodegenError {
    fn from(kind: CodegenErrorKind) -> Self {
        CodegenError {
            kind,
            backend: None,
        }
    }
}

impl From<SpellingError> for CodegenError {
    fn from(e: SpellingError) -> Self {
        CodegenErrorKind::Spelling(e).into()
    }
}

impl Diagnostic for CodegenError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: &'static str = match &self.kind {
            CodegenErrorKind::UnsupportedTemplate { .. } => "E3001",
            CodegenErrorKind::MissingTemplateArgument { .. } => "E3002",
            CodegenErrorKind::OneWayRecord { .. } => "E3003",
            CodegenErrorKind::Spelling(_) => "E3004",
            CodegenErrorKind::Backend { .. } => "E3005",
            CodegenErrorKind::Output { .. } => "E3006",
            CodegenErrorKind::DuplicateOutput { .. } => "E3007",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.kind {
            CodegenErrorKind::OneWayRecord { .. } => Some(Box::new(
                "records holding callbacks can only be passed from the host to native code",
            )),
            _ => None,
        }
    }
}

impl fmt::Display for CodegenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenErrorKind::UnsupportedTemplate { name } => {
                write!(f, "no conversion rule for template '{}'", name)
            }
            CodegenErrorKind::MissingTemplateArgument {
                template,
                index,
                found,
            } => write!(
                f,
                "'{}' has {} argument(s), rule needs argument #{}",
                template, found, index
            ),
            CodegenErrorKind::OneWayRecord { record } => {
                write!(f, "record '{}' holds a function and cannot be converted to the host", record)
            }
            CodegenErrorKind::Spelling(e) => write!(f, "{}", e),
            CodegenErrorKind::Backend { message } => f.write_str(message),
            CodegenErrorKind::Output { path, message } => {
                write!(f, "cannot write {}: {}", path.display(), message)
            }
            CodegenErrorKind::DuplicateOutput { path } => {
                write!(f, "{} was generated more than once", path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_name_prefixes_message() {
        let err = CodegenError::unsupported_template("std::deque").in_backend("node");
        assert_eq!(
            err.to_string(),
            "backend 'node': no conversion rule for template 'std::deque'"
        );
        assert_eq!(err.code().unwrap().to_string(), "E3001");
    }

    #[test]
    fn first_backend_wins() {
        let err = CodegenError::backend("nope").in_backend("a").in_backend("b");
        assert_eq!(err.backend.as_deref(), Some("a"));
    }
}
