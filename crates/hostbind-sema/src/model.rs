// src/model.rs
//
// The bound model. Built once by the binder and shared read-only by every
// backend; entities refer to each other by arena id.

use hostbind_identity::{ClassId, EnumId, KeyTypeId, OpaqueId, PrimitiveId, StructId};
use hostbind_spec::Arity;
use indexmap::IndexMap;

use crate::types::{Func, Type};
use crate::well_known::WellKnownNames;

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub cpp_name: String,
    pub is_abstract: bool,
    pub is_interface: bool,
    pub base: Option<ClassId>,
    /// Direct subclasses in declaration order.
    pub subclasses: Vec<ClassId>,
    /// Name the shared handle of this class is registered under.
    pub shared_ptr_wrapped: Option<String>,
    pub needs_deref: bool,
    /// Element type, if the class exposes iteration.
    pub iterable: Option<Type>,
    /// Instance methods, static methods, constructors, then properties.
    pub methods: Vec<Method>,
}

impl Class {
    pub fn is_shared(&self) -> bool {
        self.shared_ptr_wrapped.is_some()
    }

    pub fn methods_of(&self, kind: MethodKind) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(move |m| m.kind == kind)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Method> {
        self.methods_of(MethodKind::Constructor)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Method> {
        self.methods_of(MethodKind::Property)
    }

    pub fn method(&self, unique_name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.unique_name == unique_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Instance,
    Static,
    /// A static method returning the owning class.
    Constructor,
    /// A const zero-argument instance accessor.
    Property,
}

impl MethodKind {
    pub fn is_static(&self) -> bool {
        matches!(self, MethodKind::Static | MethodKind::Constructor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Instance => "method",
            MethodKind::Static => "static method",
            MethodKind::Constructor => "constructor",
            MethodKind::Property => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub kind: MethodKind,
    pub on: ClassId,
    /// `<Class>_<unique_name>`, unique across the whole model.
    pub id: String,
    pub name: String,
    pub unique_name: String,
    pub cpp_name: String,
    pub sig: Func,
}

impl Method {
    /// Native call expression for this method on `on`.
    pub fn call(&self, on: &Class, receiver: &str, args: &[String]) -> String {
        let args = args.join(", ");
        match self.kind {
            MethodKind::Instance | MethodKind::Property => {
                format!("{}.{}({})", receiver, self.cpp_name, args)
            }
            MethodKind::Static => format!("{}::{}({})", on.cpp_name, self.cpp_name, args),
            MethodKind::Constructor if on.is_shared() => {
                format!("std::make_shared<{}>({})", on.cpp_name, args)
            }
            MethodKind::Constructor => format!("{}({})", on.cpp_name, args),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    pub id: StructId,
    pub name: String,
    pub cpp_name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub cpp_name: String,
    pub ty: Type,
    /// No default and not an optional/nullable wrapper.
    pub required: bool,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub id: EnumId,
    pub name: String,
    pub cpp_name: String,
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enumerator {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyType {
    pub id: KeyTypeId,
    pub name: String,
    pub underlying: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Opaque {
    pub id: OpaqueId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub id: PrimitiveId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: String,
    pub ty: Type,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MixedInfo {
    pub getters: Vec<MixedGetter>,
    pub unused_data_types: Vec<String>,
    /// Types a mixed value can be constructed from.
    pub ctors: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixedGetter {
    pub data_type: String,
    pub getter: String,
    pub ty: Type,
}

/// Fully resolved model. There is no public constructor besides the binder.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSpec {
    pub(crate) classes: Vec<Class>,
    pub(crate) class_order: Vec<ClassId>,
    pub(crate) records: Vec<Struct>,
    pub(crate) enums: Vec<Enum>,
    pub(crate) key_types: Vec<KeyType>,
    pub(crate) opaque_types: Vec<Opaque>,
    pub(crate) primitives: Vec<Primitive>,
    pub(crate) templates: IndexMap<String, Arity>,
    /// Every registered name, in registration order.
    pub(crate) types: IndexMap<String, Type>,
    pub(crate) headers: Vec<String>,
    pub(crate) constants: Vec<Constant>,
    pub(crate) mixed_info: MixedInfo,
    pub(crate) well_known: WellKnownNames,
}

impl BoundSpec {
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.slot()]
    }

    pub fn record(&self, id: StructId) -> &Struct {
        &self.records[id.slot()]
    }

    pub fn enumeration(&self, id: EnumId) -> &Enum {
        &self.enums[id.slot()]
    }

    pub fn key_type(&self, id: KeyTypeId) -> &KeyType {
        &self.key_types[id.slot()]
    }

    pub fn opaque(&self, id: OpaqueId) -> &Opaque {
        &self.opaque_types[id.slot()]
    }

    pub fn primitive(&self, id: PrimitiveId) -> &Primitive {
        &self.primitives[id.slot()]
    }

    /// Classes and interfaces, every base before its subclasses.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.class_order.iter().map(|id| self.class(*id))
    }

    pub fn records(&self) -> &[Struct] {
        &self.records
    }

    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    pub fn key_types(&self) -> &[KeyType] {
        &self.key_types
    }

    pub fn opaque_types(&self) -> &[Opaque] {
        &self.opaque_types
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn templates(&self) -> &IndexMap<String, Arity> {
        &self.templates
    }

    pub fn types(&self) -> &IndexMap<String, Type> {
        &self.types
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn mixed_info(&self) -> &MixedInfo {
        &self.mixed_info
    }

    pub fn well_known(&self) -> &WellKnownNames {
        &self.well_known
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn class_named(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// The type a constructor of `class` produces.
    pub fn self_type(&self, class: &Class) -> Type {
        if class.is_shared() {
            Type::template(
                self.well_known.shared_handle.clone(),
                vec![Type::Class(class.id)],
            )
        } else {
            Type::Class(class.id)
        }
    }

    /// Spec-level name of a named type; `None` for structural types.
    pub fn type_name<'a>(&'a self, ty: &'a Type) -> Option<&'a str> {
        match ty {
            Type::Class(id) => Some(&self.class(*id).name),
            Type::Struct(id) => Some(&self.record(*id).name),
            Type::Enum(id) => Some(&self.enumeration(*id).name),
            Type::KeyType(id) => Some(&self.key_type(*id).name),
            Type::Opaque(id) => Some(&self.opaque(*id).name),
            Type::Primitive(id) => Some(&self.primitive(*id).name),
            Type::Template(template) => Some(&template.name),
            Type::Const(_) | Type::Pointer(_) | Type::Ref(_) | Type::RRef(_) | Type::Func(_) => {
                None
            }
        }
    }

    pub fn is_primitive(&self, ty: &Type, name: &str) -> bool {
        matches!(ty, Type::Primitive(id) if self.primitive(*id).name == name)
    }

    pub fn is_void(&self, ty: &Type) -> bool {
        self.is_primitive(ty, &self.well_known.void)
    }

    pub fn is_optional(&self, ty: &Type) -> bool {
        matches!(ty, Type::Template(t) if self.well_known.is_optional(&t.name))
    }

    pub fn is_nullable(&self, ty: &Type) -> bool {
        matches!(ty, Type::Template(t) if self.well_known.is_nullable(&t.name))
    }

    /// Optional wrapping a type named `inner`.
    pub fn is_optional_of(&self, ty: &Type, inner: &str) -> bool {
        self.is_optional(ty) && self.first_arg_named(ty, inner)
    }

    pub fn is_nullable_of(&self, ty: &Type, inner: &str) -> bool {
        self.is_nullable(ty) && self.first_arg_named(ty, inner)
    }

    fn first_arg_named(&self, ty: &Type, inner: &str) -> bool {
        ty.as_template()
            .and_then(|t| t.args.first())
            .and_then(|arg| self.type_name(arg))
            == Some(inner)
    }

    /// The wrapped type of an optional or nullable instance.
    pub fn optional_or_nullable_inner<'t>(&self, ty: &'t Type) -> Option<&'t Type> {
        match ty {
            Type::Template(t)
                if self.well_known.is_optional(&t.name) || self.well_known.is_nullable(&t.name) =>
            {
                t.args.first()
            }
            _ => None,
        }
    }

    pub fn root_base(&self, class: &Class) -> ClassId {
        let mut id = class.id;
        while let Some(base) = self.class(id).base {
            id = base;
        }
        id
    }

    /// Every transitive subclass, parents before children.
    pub fn descendants(&self, class: &Class) -> Vec<ClassId> {
        let mut out = Vec::new();
        let mut stack: Vec<ClassId> = class.subclasses.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.class(id).subclasses.iter().rev().copied());
        }
        out
    }
}
