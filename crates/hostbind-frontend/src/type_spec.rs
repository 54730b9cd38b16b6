// src/type_spec.rs
//
// Unresolved, purely structural type-expression tree.

use std::fmt;

/// Wrapper kinds applied around a type by `const`, `*`, `&` and `&&`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Const,
    Pointer,
    Ref,
    RRef,
}

impl ModifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierKind::Const => "const",
            ModifierKind::Pointer => "*",
            ModifierKind::Ref => "&",
            ModifierKind::RRef => "&&",
        }
    }

    /// `&` and `&&` close a type; nothing may wrap a reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, ModifierKind::Ref | ModifierKind::RRef)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// A (possibly `::`-qualified) name, flattened into one string.
    Name(String),
    Template {
        name: String,
        args: Vec<TypeSpec>,
    },
    Function(FunctionSpec),
    Modified {
        kind: ModifierKind,
        inner: Box<TypeSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub args: Vec<ArgSpec>,
    pub ret: Box<TypeSpec>,
    pub is_const: bool,
    pub is_noexcept: bool,
    pub is_off_thread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: String,
    pub ty: TypeSpec,
}

impl TypeSpec {
    pub fn name(name: impl Into<String>) -> Self {
        TypeSpec::Name(name.into())
    }

    pub fn template(name: impl Into<String>, args: Vec<TypeSpec>) -> Self {
        TypeSpec::Template {
            name: name.into(),
            args,
        }
    }

    pub fn modified(kind: ModifierKind, inner: TypeSpec) -> Self {
        TypeSpec::Modified {
            kind,
            inner: Box::new(inner),
        }
    }

    /// The return type given to signatures written without `->`.
    pub fn void() -> Self {
        TypeSpec::name("void")
    }

    /// True for the bare name `name`, with no template or modifiers.
    pub fn is_name(&self, name: &str) -> bool {
        matches!(self, TypeSpec::Name(n) if n == name)
    }

    pub fn as_function(&self) -> Option<&FunctionSpec> {
        match self {
            TypeSpec::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn into_function(self) -> Option<FunctionSpec> {
        match self {
            TypeSpec::Function(func) => Some(func),
            _ => None,
        }
    }
}

impl FunctionSpec {
    pub fn new(args: Vec<ArgSpec>, ret: TypeSpec) -> Self {
        Self {
            args,
            ret: Box::new(ret),
            is_const: false,
            is_noexcept: false,
            is_off_thread: false,
        }
    }
}

impl ArgSpec {
    pub fn new(name: impl Into<String>, ty: TypeSpec) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Canonical spelling in the type-expression grammar; re-parsing it yields
/// an equal tree. Modifiers always print as suffixes.
impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Name(name) => f.write_str(name),
            TypeSpec::Template { name, args } => {
                write!(f, "{}<", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            TypeSpec::Function(func) => write!(f, "{}", func),
            TypeSpec::Modified { kind, inner } => match kind {
                ModifierKind::Const => write!(f, "{} const", inner),
                ModifierKind::Pointer | ModifierKind::Ref | ModifierKind::RRef => {
                    write!(f, "{}{}", inner, kind.as_str())
                }
            },
        }
    }
}

impl fmt::Display for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", arg.name, arg.ty)?;
        }
        f.write_str(")")?;
        if self.is_const {
            f.write_str(" const")?;
        }
        if self.is_noexcept {
            f.write_str(" noexcept")?;
        }
        if self.is_off_thread {
            f.write_str(" off_thread")?;
        }
        write!(f, " -> {}", self.ret)
    }
}
