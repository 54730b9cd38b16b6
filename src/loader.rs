// src/loader.rs
//
// Reading spec documents and the names config from disk. Everything past
// this module works on parsed values only.

use std::fs;
use std::path::Path;

use crate::errors::PipelineError;
use crate::sema::WellKnownNames;
use crate::spec::RelaxedSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.json` is JSON; every other extension is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

pub fn load_document(path: &Path) -> Result<RelaxedSpec, PipelineError> {
    let text = read(path)?;
    parse_document(&text, DocumentFormat::from_path(path), path)
}

/// Parse document text. `path` is only used in error messages.
pub fn parse_document(
    text: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<RelaxedSpec, PipelineError> {
    let parsed: Result<RelaxedSpec, String> = match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };
    let spec = parsed.map_err(|message| PipelineError::Load {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::debug!(
        path = %path.display(),
        ?format,
        classes = spec.classes.len(),
        records = spec.records.len(),
        "loaded document"
    );
    Ok(spec)
}

/// Load a YAML names config. Keys left out keep their defaults.
pub fn load_config(path: &Path) -> Result<WellKnownNames, PipelineError> {
    let text = read(path)?;
    // An empty file deserializes to YAML null, not an empty mapping.
    if text.trim().is_empty() {
        return Ok(WellKnownNames::default());
    }
    serde_yaml::from_str(&text).map_err(|e| PipelineError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read(path: &Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("spec")), DocumentFormat::Yaml);
    }

    #[test]
    fn json_and_yaml_read_the_same_shape() {
        let yaml = parse_document(
            "primitives: [void, int]\nrecords:\n  Point:\n    fields:\n      x: int\n",
            DocumentFormat::Yaml,
            Path::new("p.yaml"),
        )
        .unwrap();
        let json = parse_document(
            r#"{"primitives": ["void", "int"], "records": {"Point": {"fields": {"x": "int"}}}}"#,
            DocumentFormat::Json,
            Path::new("p.json"),
        )
        .unwrap();
        assert_eq!(yaml.primitives, json.primitives);
        assert_eq!(yaml.records.len(), 1);
        assert_eq!(json.records.len(), 1);
    }

    #[test]
    fn malformed_document_is_a_load_error() {
        let err = parse_document("classes: [", DocumentFormat::Yaml, Path::new("bad.yaml"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Load { .. }));
        assert!(err.to_string().starts_with("bad.yaml is not a valid spec document"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn config_overrides_some_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.yaml");
        fs::write(&path, "optional:\n  - std::optional\nvoid: Void\n").unwrap();
        let names = load_config(&path).unwrap();
        assert_eq!(names.optional, vec!["std::optional".to_string()]);
        assert_eq!(names.void, "Void");
        assert_eq!(names.mixed, WellKnownNames::default().mixed);
    }

    #[test]
    fn unknown_config_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.yaml");
        fs::write(&path, "optinal: []\n").unwrap();
        assert!(matches!(load_config(&path), Err(PipelineError::Config { .. })));
    }
}
