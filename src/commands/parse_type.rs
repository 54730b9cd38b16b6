// src/commands/parse_type.rs

use std::process::ExitCode;

use crate::cli::ColorMode;
use crate::errors::render_to_stderr;
use crate::frontend::{TypeSpec, parse_type};

/// Parse one type expression and print its tree and canonical spelling.
pub fn parse_type_text(text: &str, color_mode: ColorMode) -> ExitCode {
    match parse_type(text) {
        Ok(spec) => {
            print!("{}", render_tree(&spec));
            println!("canonical: {}", spec);
            ExitCode::SUCCESS
        }
        Err(e) => {
            render_to_stderr(&e, color_mode.stderr_enabled());
            ExitCode::FAILURE
        }
    }
}

/// Indented tree, one node per line.
pub fn render_tree(spec: &TypeSpec) -> String {
    let mut out = String::new();
    write_node(spec, 0, &mut out);
    out
}

fn write_node(spec: &TypeSpec, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match spec {
        TypeSpec::Name(name) => {
            out.push_str(&format!("{}Name {}\n", indent, name));
        }
        TypeSpec::Template { name, args } => {
            out.push_str(&format!("{}Template {}\n", indent, name));
            for arg in args {
                write_node(arg, depth + 1, out);
            }
        }
        TypeSpec::Function(func) => {
            let mut flags = Vec::new();
            if func.is_const {
                flags.push("const");
            }
            if func.is_noexcept {
                flags.push("noexcept");
            }
            if func.is_off_thread {
                flags.push("off_thread");
            }
            if flags.is_empty() {
                out.push_str(&format!("{}Function\n", indent));
            } else {
                out.push_str(&format!("{}Function [{}]\n", indent, flags.join(", ")));
            }
            for arg in &func.args {
                out.push_str(&format!("{}  arg {}\n", indent, arg.name));
                write_node(&arg.ty, depth + 2, out);
            }
            out.push_str(&format!("{}  ret\n", indent));
            write_node(&func.ret, depth + 2, out);
        }
        TypeSpec::Modified { kind, inner } => {
            out.push_str(&format!("{}Modified {}\n", indent, kind.as_str()));
            write_node(inner, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_tree() {
        let spec = parse_type("std::map<std::string, int>").unwrap();
        assert_eq!(
            render_tree(&spec),
            "Template std::map\n  Name std::string\n  Name int\n"
        );
    }

    #[test]
    fn function_tree_lists_args_then_return() {
        let spec = parse_type("(a: int&) const -> void").unwrap();
        assert_eq!(
            render_tree(&spec),
            "Function [const]\n  arg a\n    Modified &\n      Name int\n  ret\n    Name void\n"
        );
    }
}
