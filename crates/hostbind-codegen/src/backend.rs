// src/backend.rs

use std::path::PathBuf;

use hostbind_sema::BoundSpec;

use crate::errors::CodegenResult;
use crate::output::{MemoryWriter, OutputWriter};

/// One output generator. Backends read the bound model and share nothing else.
pub trait Backend {
    fn name(&self) -> &str;

    fn generate(&self, spec: &BoundSpec, out: &mut dyn OutputWriter) -> CodegenResult<()>;
}

/// Run every backend, then commit their files to `out`.
///
/// Files are staged in memory first; if any backend fails nothing reaches
/// `out`. Returns the committed paths in write order.
pub fn run_backends(
    spec: &BoundSpec,
    backends: &[&dyn Backend],
    out: &mut dyn OutputWriter,
) -> CodegenResult<Vec<PathBuf>> {
    let _span = tracing::debug_span!("run_backends", backends = backends.len()).entered();
    let mut staged = MemoryWriter::new();
    for backend in backends {
        let _span = tracing::debug_span!("backend", name = backend.name()).entered();
        let before = staged.len();
        backend
            .generate(spec, &mut staged)
            .map_err(|e| e.in_backend(backend.name()))?;
        tracing::debug!(files = staged.len() - before, "backend finished");
    }

    let mut written = Vec::with_capacity(staged.len());
    for (path, contents) in staged.into_files() {
        out.write_file(&path, &contents)?;
        written.push(path);
    }
    tracing::debug!(files = written.len(), "committed output");
    Ok(written)
}
