// src/pipeline.rs
//
// load -> normalize -> bind -> generate, with one error type for the lot.

use std::path::{Path, PathBuf};

use crate::codegen::{Backend, OutputWriter, run_backends};
use crate::errors::PipelineError;
use crate::loader::{DocumentFormat, load_config, load_document, parse_document};
use crate::sema::{BoundSpec, WellKnownNames, bind_model_with};
use crate::spec::{RelaxedSpec, Spec, normalize_spec};

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    well_known: WellKnownNames,
}

impl Pipeline {
    pub fn new(well_known: WellKnownNames) -> Self {
        Self { well_known }
    }

    /// Default names, or the ones from `config` when given.
    pub fn from_config(config: Option<&Path>) -> Result<Self, PipelineError> {
        match config {
            Some(path) => Ok(Self::new(load_config(path)?)),
            None => Ok(Self::default()),
        }
    }

    pub fn well_known(&self) -> &WellKnownNames {
        &self.well_known
    }

    pub fn normalize(&self, relaxed: RelaxedSpec) -> Result<Spec, PipelineError> {
        Ok(normalize_spec(relaxed)?)
    }

    pub fn bind(&self, spec: &Spec) -> Result<BoundSpec, PipelineError> {
        Ok(bind_model_with(spec, self.well_known.clone())?)
    }

    pub fn bind_file(&self, path: &Path) -> Result<BoundSpec, PipelineError> {
        let _span = tracing::debug_span!("bind_file", path = %path.display()).entered();
        let spec = self.normalize(load_document(path)?)?;
        self.bind(&spec)
    }

    /// Same as `bind_file` for text already in memory.
    pub fn bind_text(
        &self,
        text: &str,
        format: DocumentFormat,
        path: &Path,
    ) -> Result<BoundSpec, PipelineError> {
        let spec = self.normalize(parse_document(text, format, path)?)?;
        self.bind(&spec)
    }

    /// Run `backends` over a bound model. Nothing is written unless all succeed.
    pub fn generate(
        &self,
        spec: &BoundSpec,
        backends: &[&dyn Backend],
        out: &mut dyn OutputWriter,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        Ok(run_backends(spec, backends, out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{CodegenError, CodegenResult, MemoryWriter};
    use crate::sema::BindError;

    const DOCUMENT: &str = r#"
primitives: [void, int64_t]
classes:
  Base:
    methods:
      size: "() const -> int64_t"
  Derived:
    base: Base
"#;

    fn bind(text: &str) -> Result<BoundSpec, PipelineError> {
        Pipeline::default().bind_text(text, DocumentFormat::Yaml, Path::new("doc.yaml"))
    }

    struct ClassList;

    impl Backend for ClassList {
        fn name(&self) -> &str {
            "class-list"
        }

        fn generate(&self, spec: &BoundSpec, out: &mut dyn OutputWriter) -> CodegenResult<()> {
            let names: Vec<&str> = spec.classes().map(|c| c.name.as_str()).collect();
            out.write_file(Path::new("classes.txt"), &names.join("\n"))
        }
    }

    struct Broken;

    impl Backend for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn generate(&self, _spec: &BoundSpec, _out: &mut dyn OutputWriter) -> CodegenResult<()> {
            Err(CodegenError::backend("cannot emit"))
        }
    }

    #[test]
    fn binds_document_text() {
        let bound = bind(DOCUMENT).unwrap();
        let names: Vec<&str> = bound.classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Base", "Derived"]);
    }

    #[test]
    fn normalize_failure_is_reported_as_such() {
        let err = bind("primitives: [void]\nrecords:\n  R:\n    fields:\n      x: \"a<\"\n")
            .unwrap_err();
        assert!(matches!(err, PipelineError::Normalize(_)));
        assert_eq!(err.phase(), "normalize");
    }

    #[test]
    fn bind_failure_is_reported_as_such() {
        let err = bind("primitives: [void]\nclasses:\n  A:\n    base: Missing\n").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Bind(BindError::UnknownBase { .. })
        ));
    }

    #[test]
    fn generate_commits_backend_output() {
        let bound = bind(DOCUMENT).unwrap();
        let mut out = MemoryWriter::new();
        let written = Pipeline::default()
            .generate(&bound, &[&ClassList], &mut out)
            .unwrap();
        assert_eq!(written, vec![PathBuf::from("classes.txt")]);
        assert_eq!(out.get("classes.txt"), Some("Base\nDerived"));
    }

    #[test]
    fn failed_generate_writes_nothing() {
        let bound = bind(DOCUMENT).unwrap();
        let mut out = MemoryWriter::new();
        let err = Pipeline::default()
            .generate(&bound, &[&ClassList, &Broken], &mut out)
            .unwrap_err();
        assert_eq!(err.to_string(), "backend 'broken': cannot emit");
        assert!(out.is_empty());
    }
}
