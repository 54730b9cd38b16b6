// src/output.rs
//
// File emission is injected so a run can be staged in memory first.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::errors::{CodegenError, CodegenResult};

pub trait OutputWriter {
    /// Write `contents` to `path`, relative to the output root.
    fn write_file(&mut self, path: &Path, contents: &str) -> CodegenResult<()>;
}

/// Collects files in write order. Writing a path twice is an error.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    files: IndexMap<PathBuf, String>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn into_files(self) -> impl Iterator<Item = (PathBuf, String)> {
        self.files.into_iter()
    }
}

impl OutputWriter for MemoryWriter {
    fn write_file(&mut self, path: &Path, contents: &str) -> CodegenResult<()> {
        if self.files.contains_key(path) {
            return Err(CodegenError::duplicate_output(path));
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Writes below a root directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    root: PathBuf,
}

impl DirectoryWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputWriter for DirectoryWriter {
    fn write_file(&mut self, path: &Path, contents: &str) -> CodegenResult<()> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| CodegenError::output(&full, e))?;
        }
        fs::write(&full, contents).map_err(|e| CodegenError::output(&full, e))?;
        tracing::trace!(path = %full.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CodegenErrorKind;

    #[test]
    fn memory_writer_rejects_duplicates() {
        let mut out = MemoryWriter::new();
        out.write_file(Path::new("a.ts"), "x").unwrap();
        let err = out.write_file(Path::new("a.ts"), "y").unwrap_err();
        assert!(matches!(err.kind, CodegenErrorKind::DuplicateOutput { .. }));
        assert_eq!(out.get("a.ts"), Some("x"));
    }

    #[test]
    fn directory_writer_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = DirectoryWriter::new(dir.path());
        out.write_file(Path::new("node/binding.cpp"), "// generated\n")
            .unwrap();
        let text = fs::read_to_string(dir.path().join("node/binding.cpp")).unwrap();
        assert_eq!(text, "// generated\n");
    }
}
