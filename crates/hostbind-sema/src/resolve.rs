// src/resolve.rs
//
// TypeSpec -> Type. Functions first, then modifiers, then names and
// templates; modifiers wrap whatever they were parsed around.

use hostbind_frontend::{FunctionSpec, ModifierKind, TypeSpec};
use hostbind_identity::is_reserved_arg_name;

use crate::errors::BindError;
use crate::registry::Registry;
use crate::types::{Arg, Func, Type};

pub(crate) fn resolve(registry: &Registry, spec: &TypeSpec, site: &str) -> Result<Type, BindError> {
    match spec {
        TypeSpec::Function(func) => Ok(Type::Func(Box::new(resolve_func(registry, func, site)?))),
        TypeSpec::Modified { kind, inner } => {
            let inner = Box::new(resolve(registry, inner, site)?);
            Ok(match kind {
                ModifierKind::Const => Type::Const(inner),
                ModifierKind::Pointer => Type::Pointer(inner),
                ModifierKind::Ref => Type::Ref(inner),
                ModifierKind::RRef => Type::RRef(inner),
            })
        }
        TypeSpec::Name(name) => registry
            .get(name)
            .cloned()
            .ok_or_else(|| BindError::NoSuchType {
                name: name.clone(),
                site: site.to_string(),
            }),
        TypeSpec::Template { name, args } => {
            let arity = registry.arity(name).ok_or_else(|| BindError::NoSuchTemplate {
                name: name.clone(),
                site: site.to_string(),
            })?;
            if !arity.accepts(args.len()) {
                return Err(BindError::TemplateArity {
                    name: name.clone(),
                    expected: arity,
                    found: args.len(),
                    site: site.to_string(),
                });
            }
            let args = args
                .iter()
                .map(|arg| resolve(registry, arg, site))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::template(name.clone(), args))
        }
    }
}

pub(crate) fn resolve_func(
    registry: &Registry,
    func: &FunctionSpec,
    site: &str,
) -> Result<Func, BindError> {
    let mut args = Vec::with_capacity(func.args.len());
    for arg in &func.args {
        if is_reserved_arg_name(&arg.name) {
            return Err(BindError::ReservedArgName {
                name: arg.name.clone(),
                site: site.to_string(),
            });
        }
        args.push(Arg::new(arg.name.clone(), resolve(registry, &arg.ty, site)?));
    }
    Ok(Func {
        ret: resolve(registry, &func.ret, site)?,
        args,
        is_const: func.is_const,
        is_noexcept: func.is_noexcept,
        is_off_thread: func.is_off_thread,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostbind_frontend::parse_type;
    use hostbind_identity::{EntityKind, PrimitiveId};
    use hostbind_spec::Arity;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_template("std::vector", Arity::Fixed(1))
            .unwrap();
        registry.register_template("std::tuple", Arity::Any).unwrap();
        for (i, name) in ["void", "int"].iter().enumerate() {
            registry
                .register(
                    name,
                    EntityKind::Primitive,
                    Type::Primitive(PrimitiveId::new(i as u32)),
                )
                .unwrap();
        }
        registry
    }

    fn resolve_text(text: &str) -> Result<Type, BindError> {
        resolve(&registry(), &parse_type(text).unwrap(), "test")
    }

    #[test]
    fn modifiers_wrap_resolved_types() {
        let int = Type::Primitive(PrimitiveId::new(1));
        assert_eq!(
            resolve_text("int const&").unwrap(),
            Type::Ref(Box::new(Type::Const(Box::new(int))))
        );
    }

    #[test]
    fn functions_default_to_void() {
        let ty = resolve_text("(n: int)").unwrap();
        let func = ty.as_func().unwrap();
        assert_eq!(func.ret, Type::Primitive(PrimitiveId::new(0)));
        assert_eq!(func.args[0].name, "n");
    }

    #[test]
    fn any_arity_accepts_every_count() {
        assert!(resolve_text("std::tuple<int, int, int>").is_ok());
    }

    #[test]
    fn unknown_names_and_templates() {
        assert!(matches!(
            resolve_text("std::vector<Widget>"),
            Err(BindError::NoSuchType { name, .. }) if name == "Widget"
        ));
        assert!(matches!(
            resolve_text("std::list<int>"),
            Err(BindError::NoSuchTemplate { name, .. }) if name == "std::list"
        ));
        assert!(matches!(
            resolve_text("std::vector<int, int>"),
            Err(BindError::TemplateArity { found: 2, .. })
        ));
    }

    #[test]
    fn reserved_argument_prefix() {
        assert!(matches!(
            resolve_text("(_self: int)"),
            Err(BindError::ReservedArgName { name, .. }) if name == "_self"
        ));
    }
}
