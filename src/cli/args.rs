// src/cli/args.rs

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::commands::version::version_string;

/// Color output mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Whether diagnostics written to stderr should be colored.
    pub fn stderr_enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stderr().is_terminal(),
        }
    }
}

/// Binding generator front end
#[derive(Parser)]
#[command(name = "hostbind")]
#[command(version = version_string())]
#[command(about = "Check and inspect binding spec documents", long_about = None)]
pub struct Cli {
    /// Color output: auto, always, never
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// YAML file overriding the well-known template and primitive names
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load, normalize and bind spec documents, reporting the first error of each
    #[command(visible_alias = "c")]
    Check {
        /// Spec documents (.json, or YAML otherwise)
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
    /// Bind one spec document and print the bound model
    Dump {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also print the table of every registered type name
        #[arg(long)]
        types: bool,
    },
    /// Parse one type expression and print its tree
    ParseType {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_is_global() {
        let cli = Cli::try_parse_from(["hostbind", "check", "a.yaml", "--config", "names.yaml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("names.yaml")));
        assert!(matches!(cli.command, Commands::Check { ref files } if files.len() == 1));
    }

    #[test]
    fn dump_types_flag() {
        let cli = Cli::try_parse_from(["hostbind", "--color", "never", "dump", "a.yaml", "--types"])
            .unwrap();
        assert_eq!(cli.color, ColorMode::Never);
        assert!(matches!(cli.command, Commands::Dump { types: true, .. }));
    }

    #[test]
    fn check_requires_a_file() {
        assert!(Cli::try_parse_from(["hostbind", "check"]).is_err());
    }
}
