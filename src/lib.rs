// src/lib.rs

// Public modules (the hostbind driver API)
pub mod cli;
pub mod commands;
pub mod errors;
pub mod loader;
pub mod pipeline;

// Internal crate aliases. Tools that need more than the driver should depend
// on the sub-crates directly.
pub(crate) use hostbind_codegen as codegen;
pub(crate) use hostbind_frontend as frontend;
pub(crate) use hostbind_sema as sema;
pub(crate) use hostbind_spec as spec;

pub use errors::PipelineError;
pub use loader::{DocumentFormat, load_config, load_document, parse_document};
pub use pipeline::Pipeline;
