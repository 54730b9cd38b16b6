// src/types.rs
//
// Resolved types. Named entities are referenced by arena id, so a `Type` is a
// small owned tree that can be cloned freely and compared structurally.

use hostbind_identity::{ClassId, EnumId, KeyTypeId, OpaqueId, PrimitiveId, StructId};

use crate::well_known::WellKnownNames;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Const(Box<Type>),
    Pointer(Box<Type>),
    Ref(Box<Type>),
    RRef(Box<Type>),
    Func(Box<Func>),
    Template(Template),
    Class(ClassId),
    Struct(StructId),
    Primitive(PrimitiveId),
    Opaque(OpaqueId),
    KeyType(KeyTypeId),
    Enum(EnumId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template {
    pub name: String,
    pub args: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Func {
    pub ret: Type,
    pub args: Vec<Arg>,
    pub is_const: bool,
    pub is_noexcept: bool,
    pub is_off_thread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arg {
    pub name: String,
    pub ty: Type,
}

impl Type {
    pub fn template(name: impl Into<String>, args: Vec<Type>) -> Self {
        Type::Template(Template {
            name: name.into(),
            args,
        })
    }

    /// Strip any number of `Const`, `Ref` and `RRef` wrappers.
    pub fn remove_const_ref(&self) -> &Type {
        let mut ty = self;
        while let Type::Const(inner) | Type::Ref(inner) | Type::RRef(inner) = ty {
            ty = inner;
        }
        ty
    }

    pub fn as_template(&self) -> Option<&Template> {
        match self {
            Type::Template(template) => Some(template),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&Func> {
        match self {
            Type::Func(func) => Some(func),
            _ => None,
        }
    }

    pub fn is_template(&self, name: &str) -> bool {
        matches!(self, Type::Template(t) if t.name == name)
    }

    /// True when a function type appears anywhere inside. Records holding
    /// callbacks are only converted towards native code.
    pub fn contains_function(&self) -> bool {
        match self {
            Type::Func(_) => true,
            Type::Const(inner) | Type::Pointer(inner) | Type::Ref(inner) | Type::RRef(inner) => {
                inner.contains_function()
            }
            Type::Template(template) => template.args.iter().any(Type::contains_function),
            Type::Class(_)
            | Type::Struct(_)
            | Type::Primitive(_)
            | Type::Opaque(_)
            | Type::KeyType(_)
            | Type::Enum(_) => false,
        }
    }
}

impl Func {
    pub fn new(ret: Type, args: Vec<Arg>) -> Self {
        Self {
            ret,
            args,
            is_const: false,
            is_noexcept: false,
            is_off_thread: false,
        }
    }

    /// Arguments the host passes; `IgnoreArgument<T>` arguments are filled natively.
    pub fn args_skipping_ignored<'a>(
        &'a self,
        well_known: &'a WellKnownNames,
    ) -> impl Iterator<Item = &'a Arg> + 'a {
        self.args
            .iter()
            .filter(move |arg| !arg.ty.is_template(&well_known.ignore_argument))
    }
}

impl Arg {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
