// src/commands/common.rs
//! Shared utilities for CLI commands.

use std::path::Path;

use crate::cli::ColorMode;
use crate::errors::{PipelineError, render_to_stderr};
use crate::pipeline::Pipeline;

/// Build the pipeline for `--config`, reporting a bad config on stderr.
pub fn pipeline_or_report(config: Option<&Path>, color: ColorMode) -> Option<Pipeline> {
    match Pipeline::from_config(config) {
        Ok(pipeline) => Some(pipeline),
        Err(e) => {
            report_error(&e, color);
            None
        }
    }
}

/// Render a pipeline error with its diagnostic.
pub fn report_error(err: &PipelineError, color: ColorMode) {
    tracing::debug!(phase = err.phase(), "pipeline failed");
    render_to_stderr(err, color.stderr_enabled());
}
