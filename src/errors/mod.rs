// src/errors/mod.rs
//! Driver-level errors and diagnostic rendering.
//!
//! Each phase keeps its own error type; `PipelineError` only says which phase
//! failed and forwards the phase's diagnostic.

#![allow(unused_assignments)] // False positives from thiserror derive

pub mod report;

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub use hostbind_codegen::CodegenError;
pub use hostbind_frontend::{LexerError, ParseError, ParserError};
pub use hostbind_sema::BindError;
pub use hostbind_spec::NormalizeError;

pub use report::{render_to_stderr, render_to_string, render_to_writer};

#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    /// The file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not well-formed JSON/YAML, or has the wrong shape
    #[error("{} is not a valid spec document: {message}", path.display())]
    #[diagnostic(help("documents ending in .json are read as JSON, anything else as YAML"))]
    Load { path: PathBuf, message: String },

    /// The well-known names file could not be used
    #[error("{} is not a valid names config: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codegen(#[from] CodegenError),
}

impl PipelineError {
    /// Name of the phase that failed, for one-line summaries.
    pub fn phase(&self) -> &'static str {
        match self {
            PipelineError::Io { .. } | PipelineError::Load { .. } | PipelineError::Config { .. } => {
                "load"
            }
            PipelineError::Normalize(_) => "normalize",
            PipelineError::Bind(_) => "bind",
            PipelineError::Codegen(_) => "codegen",
        }
    }
}
