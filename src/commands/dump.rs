// src/commands/dump.rs

use std::fmt::Write;
use std::path::Path;
use std::process::ExitCode;

use super::common::{pipeline_or_report, report_error};
use crate::cli::ColorMode;
use crate::sema::{BoundSpec, Class, display_func, display_type};

/// Bind one document and print its model to stdout.
pub fn dump_file(file: &Path, types: bool, config: Option<&Path>, color_mode: ColorMode) -> ExitCode {
    let Some(pipeline) = pipeline_or_report(config, color_mode) else {
        return ExitCode::FAILURE;
    };
    match pipeline.bind_file(file) {
        Ok(bound) => {
            print!("{}", render_model(&bound, types));
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e, color_mode);
            ExitCode::FAILURE
        }
    }
}

/// Text form of a bound model. Classes appear bases first.
pub fn render_model(spec: &BoundSpec, types: bool) -> String {
    let mut out = String::new();

    if !spec.headers().is_empty() {
        out.push_str("headers:\n");
        for header in spec.headers() {
            let _ = writeln!(out, "  {}", header);
        }
    }

    for class in spec.classes() {
        render_class(spec, class, &mut out);
    }

    for record in spec.records() {
        let _ = writeln!(out, "struct {} ({})", record.name, record.cpp_name);
        for field in &record.fields {
            let _ = write!(out, "  {}: {}", field.name, display_type(spec, &field.ty));
            if field.required {
                out.push_str(" required");
            }
            if let Some(default) = &field.default {
                let _ = write!(out, " = {}", default);
            }
            out.push('\n');
        }
    }

    for enumeration in spec.enums() {
        let values: Vec<String> = enumeration
            .enumerators
            .iter()
            .map(|e| format!("{} = {}", e.name, e.value))
            .collect();
        let _ = writeln!(
            out,
            "enum {} ({}): {}",
            enumeration.name,
            enumeration.cpp_name,
            values.join(", ")
        );
    }

    for key in spec.key_types() {
        let _ = writeln!(out, "key {}: {}", key.name, display_type(spec, &key.underlying));
    }
    for opaque in spec.opaque_types() {
        let _ = writeln!(out, "opaque {}", opaque.name);
    }
    for constant in spec.constants() {
        let _ = writeln!(
            out,
            "const {}: {} = {}",
            constant.name,
            display_type(spec, &constant.ty),
            constant.value
        );
    }

    if types {
        out.push_str("types:\n");
        for (name, ty) in spec.types() {
            let _ = writeln!(out, "  {} => {}", name, display_type(spec, ty));
        }
    }
    out
}

fn render_class(spec: &BoundSpec, class: &Class, out: &mut String) {
    let keyword = if class.is_interface { "interface" } else { "class" };
    let _ = write!(out, "{} {} ({})", keyword, class.name, class.cpp_name);
    if let Some(base) = class.base {
        let _ = write!(out, " : {}", spec.class(base).name);
    }
    out.push('\n');

    let mut flags = Vec::new();
    if class.is_abstract && !class.is_interface {
        flags.push("abstract".to_string());
    }
    if let Some(handle) = &class.shared_ptr_wrapped {
        flags.push(format!("shared as {}", handle));
    }
    if class.needs_deref {
        flags.push("needs_deref".to_string());
    }
    if let Some(element) = &class.iterable {
        flags.push(format!("iterable of {}", display_type(spec, element)));
    }
    if !flags.is_empty() {
        let _ = writeln!(out, "  [{}]", flags.join(", "));
    }

    for method in &class.methods {
        let _ = writeln!(
            out,
            "  {} {}{}",
            method.kind.as_str(),
            method.unique_name,
            display_func(spec, &method.sig)
        );
        // Shapes were validated by the binder, so only well-formed ones remain.
        if let Ok(Some(async_sig)) = spec.async_transform(&method.sig) {
            let _ = writeln!(out, "    async {}", display_func(spec, &async_sig));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DocumentFormat;
    use crate::pipeline::Pipeline;

    const DOCUMENT: &str = r#"
headers: [app.hpp]
primitives: [void, int64_t, AppError]
templates:
  util::Optional: 1
  AsyncCallback: 1
enums:
  Mode:
    values: [Low, High]
records:
  Config:
    fields:
      retries: {type: int64_t, default: 3}
      name: int64_t
keyTypes:
  ObjKey: int64_t
opaqueTypes: [Handle]
classes:
  Base:
    abstract: true
    methods:
      size: "() const -> int64_t"
  App:
    base: Base
    methods:
      refresh: "(cb: AsyncCallback<(err: util::Optional<AppError>) -> void>)"
"#;

    fn model(types: bool) -> String {
        let bound = Pipeline::default()
            .bind_text(DOCUMENT, DocumentFormat::Yaml, Path::new("doc.yaml"))
            .unwrap();
        render_model(&bound, types)
    }

    #[test]
    fn classes_print_bases_first_with_signatures() {
        let text = model(false);
        let base = text.find("class Base (Base)\n").unwrap();
        let app = text.find("class App (App) : Base\n").unwrap();
        assert!(base < app);
        assert!(text.contains("  [abstract]\n"));
        assert!(text.contains("  method size() const -> int64_t\n"));
    }

    #[test]
    fn async_methods_show_their_transformed_signature() {
        let text = model(false);
        assert!(text.contains("    async () -> AsyncResult<void>\n"), "{text}");
    }

    #[test]
    fn records_mark_required_fields() {
        let text = model(false);
        assert!(text.contains("  retries: int64_t = 3\n"), "{text}");
        assert!(text.contains("  name: int64_t required\n"), "{text}");
        assert!(text.contains("enum Mode (Mode): Low = 0, High = 1\n"));
        assert!(text.contains("key ObjKey: int64_t\n"));
        assert!(text.contains("opaque Handle\n"));
    }

    #[test]
    fn type_table_is_opt_in() {
        assert!(!model(false).contains("types:\n"));
        let text = model(true);
        assert!(text.contains("types:\n"));
        assert!(text.contains("  Base => class Base\n"));
    }
}
