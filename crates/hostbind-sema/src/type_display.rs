// src/type_display.rs
//
// Human-readable spelling of bound types, used in diagnostics and dumps.

use crate::model::BoundSpec;
use crate::types::{Func, Type};

pub fn display_type(spec: &BoundSpec, ty: &Type) -> String {
    match ty {
        Type::Const(inner) => format!("{} const", display_type(spec, inner)),
        Type::Pointer(inner) => format!("{}*", display_type(spec, inner)),
        Type::Ref(inner) => format!("{}&", display_type(spec, inner)),
        Type::RRef(inner) => format!("{}&&", display_type(spec, inner)),
        Type::Func(func) => display_func(spec, func),
        Type::Template(template) => {
            let args: Vec<String> = template
                .args
                .iter()
                .map(|arg| display_type(spec, arg))
                .collect();
            format!("{}<{}>", template.name, args.join(", "))
        }
        Type::Class(id) => format!("class {}", spec.class(*id).name),
        Type::Struct(id) => format!("struct {}", spec.record(*id).name),
        Type::Enum(id) => format!("enum {}", spec.enumeration(*id).name),
        Type::Primitive(id) => spec.primitive(*id).name.clone(),
        Type::Opaque(id) => spec.opaque(*id).name.clone(),
        Type::KeyType(id) => spec.key_type(*id).name.clone(),
    }
}

pub fn display_func(spec: &BoundSpec, func: &Func) -> String {
    let args: Vec<String> = func
        .args
        .iter()
        .map(|arg| format!("{}: {}", arg.name, display_type(spec, &arg.ty)))
        .collect();
    let mut out = format!("({})", args.join(", "));
    if func.is_const {
        out.push_str(" const");
    }
    if func.is_noexcept {
        out.push_str(" noexcept");
    }
    if func.is_off_thread {
        out.push_str(" off_thread");
    }
    out.push_str(" -> ");
    out.push_str(&display_type(spec, &func.ret));
    out
}
