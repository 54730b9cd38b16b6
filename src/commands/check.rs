// src/commands/check.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::common::{pipeline_or_report, report_error};
use crate::cli::ColorMode;

/// Check spec documents (load + normalize + bind, no output).
pub fn check_files(files: &[PathBuf], config: Option<&Path>, color_mode: ColorMode) -> ExitCode {
    let Some(pipeline) = pipeline_or_report(config, color_mode) else {
        return ExitCode::FAILURE;
    };

    let mut failed = 0;
    for path in files {
        match pipeline.bind_file(path) {
            Ok(bound) => println!(
                "{}: ok ({} classes, {} records, {} enums)",
                path.display(),
                bound.classes().count(),
                bound.records().len(),
                bound.enums().len()
            ),
            Err(e) => {
                report_error(&e, color_mode);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!("{} of {} document(s) failed", failed, files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
