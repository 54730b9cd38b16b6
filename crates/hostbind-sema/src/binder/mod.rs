// src/binder/mod.rs
//
// Spec -> BoundSpec in two phases. Phase one gives every declared name an
// arena slot so entities can refer to each other in any order; phase two
// resolves every type expression and fills the slots.

use hostbind_frontend::{FunctionSpec, TypeSpec};
use hostbind_identity::{
    ClassId, EntityKind, EnumId, KeyTypeId, OpaqueId, PrimitiveId, StructId, synthetic_name,
};
use hostbind_spec::{ClassSpec, MethodSpec, Spec};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::errors::BindError;
use crate::model::{
    BoundSpec, Class, Constant, Enum, Enumerator, Field, KeyType, Method, MethodKind, MixedGetter,
    MixedInfo, Opaque, Primitive, Struct,
};
use crate::registry::Registry;
use crate::resolve::{resolve, resolve_func};
use crate::types::{Func, Type};
use crate::well_known::WellKnownNames;

/// Bind with the default well-known names.
pub fn bind_model(spec: &Spec) -> Result<BoundSpec, BindError> {
    bind_model_with(spec, WellKnownNames::default())
}

pub fn bind_model_with(spec: &Spec, well_known: WellKnownNames) -> Result<BoundSpec, BindError> {
    let _span = tracing::debug_span!("bind_model").entered();
    let bound = Binder::new(spec, well_known).bind()?;
    tracing::debug!(
        classes = bound.classes.len(),
        records = bound.records.len(),
        enums = bound.enums.len(),
        types = bound.types.len(),
        "bound model"
    );
    Ok(bound)
}

/// Methods and flags shared by classes and interfaces.
struct ClassDecl<'s> {
    name: &'s str,
    base: Option<&'s str>,
    methods: &'s IndexMap<String, Vec<MethodSpec>>,
    static_methods: &'s IndexMap<String, Vec<MethodSpec>>,
    class: Option<&'s ClassSpec>,
}

struct Binder<'s> {
    spec: &'s Spec,
    well_known: WellKnownNames,
    registry: Registry,
    classes: Vec<Class>,
    records: Vec<Struct>,
    enums: Vec<Enum>,
    key_types: Vec<KeyType>,
    opaque_types: Vec<Opaque>,
    primitives: Vec<Primitive>,
}

impl<'s> Binder<'s> {
    fn new(spec: &'s Spec, well_known: WellKnownNames) -> Self {
        Self {
            spec,
            well_known,
            registry: Registry::new(),
            classes: Vec::new(),
            records: Vec::new(),
            enums: Vec::new(),
            key_types: Vec::new(),
            opaque_types: Vec::new(),
            primitives: Vec::new(),
        }
    }

    fn bind(mut self) -> Result<BoundSpec, BindError> {
        self.register_names()?;
        self.resolve_aliases()?;
        self.resolve_records()?;
        self.resolve_key_types()?;
        self.resolve_classes()?;
        let class_order = self.order_classes()?;
        let constants = self.resolve_constants()?;
        let mixed_info = self.resolve_mixed_info()?;

        let bound = BoundSpec {
            classes: self.classes,
            class_order,
            records: self.records,
            enums: self.enums,
            key_types: self.key_types,
            opaque_types: self.opaque_types,
            primitives: self.primitives,
            templates: self.registry.templates,
            types: self.registry.types,
            headers: self.spec.headers.clone(),
            constants,
            mixed_info,
            well_known: self.well_known,
        };
        check_async_methods(&bound)?;
        Ok(bound)
    }

    fn class_decls(&self) -> Vec<ClassDecl<'s>> {
        let spec = self.spec;
        let classes = spec.classes.iter().map(|(name, class)| ClassDecl {
            name,
            base: class.base.as_deref(),
            methods: &class.methods,
            static_methods: &class.static_methods,
            class: Some(class),
        });
        let interfaces = spec.interfaces.iter().map(|(name, iface)| ClassDecl {
            name,
            base: iface.base.as_deref(),
            methods: &iface.methods,
            static_methods: &iface.static_methods,
            class: None,
        });
        classes.chain(interfaces).collect()
    }

    fn register_names(&mut self) -> Result<(), BindError> {
        let spec = self.spec;

        for (name, arity) in &spec.templates {
            self.registry.register_template(name, *arity)?;
        }

        for name in &spec.primitives {
            let id = PrimitiveId::new(self.primitives.len() as u32);
            self.registry
                .register(name, EntityKind::Primitive, Type::Primitive(id))?;
            self.primitives.push(Primitive {
                id,
                name: name.clone(),
            });
        }

        for (name, class) in &spec.classes {
            self.register_class(
                name,
                class.cpp_name.as_deref(),
                class.shared_ptr_wrapped.as_deref(),
                false,
            )?;
            let slot = self.classes.len() - 1;
            let entry = &mut self.classes[slot];
            entry.is_abstract = class.is_abstract;
            entry.needs_deref = class.needs_deref || class.shared_ptr_wrapped.is_some();
        }
        for (name, iface) in &spec.interfaces {
            self.register_class(
                name,
                iface.cpp_name.as_deref(),
                iface.shared_ptr_wrapped.as_deref(),
                true,
            )?;
        }

        for (name, decl) in &spec.enums {
            let id = EnumId::new(self.enums.len() as u32);
            self.registry.register(name, EntityKind::Enum, Type::Enum(id))?;
            self.enums.push(Enum {
                id,
                name: name.clone(),
                cpp_name: decl.cpp_name.clone().unwrap_or_else(|| name.clone()),
                enumerators: decl
                    .values
                    .iter()
                    .map(|(name, value)| Enumerator {
                        name: name.clone(),
                        value: *value,
                    })
                    .collect(),
            });
        }

        for (name, decl) in &spec.records {
            let id = StructId::new(self.records.len() as u32);
            self.registry
                .register(name, EntityKind::Record, Type::Struct(id))?;
            self.records.push(Struct {
                id,
                name: name.clone(),
                cpp_name: decl.cpp_name.clone().unwrap_or_else(|| name.clone()),
                fields: Vec::new(),
            });
        }

        // Key type slots are filled once their underlying types resolve.
        for (index, name) in spec.key_types.keys().enumerate() {
            let id = KeyTypeId::new(index as u32);
            self.registry
                .register(name, EntityKind::KeyType, Type::KeyType(id))?;
        }

        for name in &spec.opaque_types {
            let id = OpaqueId::new(self.opaque_types.len() as u32);
            self.registry
                .register(name, EntityKind::Opaque, Type::Opaque(id))?;
            self.opaque_types.push(Opaque {
                id,
                name: name.clone(),
            });
        }
        Ok(())
    }

    fn register_class(
        &mut self,
        name: &str,
        cpp_name: Option<&str>,
        shared_ptr_wrapped: Option<&str>,
        is_interface: bool,
    ) -> Result<(), BindError> {
        let id = ClassId::new(self.classes.len() as u32);
        let kind = if is_interface {
            EntityKind::Interface
        } else {
            EntityKind::Class
        };
        self.registry.register(name, kind, Type::Class(id))?;
        if let Some(alias) = shared_ptr_wrapped {
            let handle = Type::template(self.well_known.shared_handle.clone(), vec![Type::Class(id)]);
            self.registry
                .register(alias, EntityKind::SharedHandle, handle)?;
        }
        self.classes.push(Class {
            id,
            name: name.to_string(),
            cpp_name: cpp_name.unwrap_or(name).to_string(),
            is_abstract: is_interface,
            is_interface,
            base: None,
            subclasses: Vec::new(),
            shared_ptr_wrapped: shared_ptr_wrapped.map(str::to_string),
            needs_deref: is_interface && shared_ptr_wrapped.is_some(),
            iterable: None,
            methods: Vec::new(),
        });
        Ok(())
    }

    fn resolve_type(&self, spec: &TypeSpec, site: &str) -> Result<Type, BindError> {
        resolve(&self.registry, spec, site)
    }

    fn resolve_func(&self, spec: &FunctionSpec, site: &str) -> Result<Func, BindError> {
        resolve_func(&self.registry, spec, site)
    }

    fn resolve_aliases(&mut self) -> Result<(), BindError> {
        for (name, spec) in &self.spec.type_aliases {
            let site = format!("type alias '{}'", name);
            let ty = self.resolve_type(spec, &site)?;
            self.registry.register(name, EntityKind::TypeAlias, ty)?;
        }
        Ok(())
    }

    fn is_optional_or_nullable(&self, ty: &Type) -> bool {
        matches!(ty, Type::Template(t)
            if self.well_known.is_optional(&t.name) || self.well_known.is_nullable(&t.name))
    }

    fn resolve_records(&mut self) -> Result<(), BindError> {
        let spec = self.spec;
        for (slot, (name, decl)) in spec.records.iter().enumerate() {
            let mut fields = Vec::with_capacity(decl.fields.len());
            for (field_name, field) in &decl.fields {
                let site = format!("record '{}', field '{}'", name, field_name);
                let ty = self.resolve_type(&field.ty, &site)?;
                let required = field.default.is_none() && !self.is_optional_or_nullable(&ty);
                fields.push(Field {
                    name: field_name.clone(),
                    cpp_name: field.cpp_name.clone().unwrap_or_else(|| field_name.clone()),
                    ty,
                    required,
                    default: field.default.clone(),
                });
            }
            self.records[slot].fields = fields;
        }
        Ok(())
    }

    fn resolve_key_types(&mut self) -> Result<(), BindError> {
        let spec = self.spec;
        for (index, (name, underlying)) in spec.key_types.iter().enumerate() {
            let site = format!("key type '{}'", name);
            let underlying = self.resolve_type(underlying, &site)?;
            let id = KeyTypeId::new(index as u32);
            debug_assert_eq!(id.slot(), self.key_types.len());
            self.key_types.push(KeyType {
                id,
                name: name.clone(),
                underlying,
            });
        }
        Ok(())
    }

    fn resolve_methods(
        &self,
        on: ClassId,
        class_name: &str,
        kind: MethodKind,
        table: &IndexMap<String, Vec<MethodSpec>>,
        out: &mut Vec<Method>,
    ) -> Result<(), BindError> {
        for (name, overloads) in table {
            for overload in overloads {
                let unique_name = overload.unique_name(name);
                let site = format!("{} '{}' of '{}'", kind.as_str(), unique_name, class_name);
                let sig = self.resolve_func(&overload.sig, &site)?;
                out.push(Method {
                    kind,
                    on,
                    id: synthetic_name(class_name, &unique_name),
                    name: name.clone(),
                    cpp_name: overload.cpp_name.clone().unwrap_or_else(|| name.clone()),
                    unique_name,
                    sig,
                });
            }
        }
        Ok(())
    }

    fn resolve_base(&self, class: &str, base: &str) -> Result<ClassId, BindError> {
        match self.registry.kind_of(base) {
            None => Err(BindError::UnknownBase {
                class: class.to_string(),
                base: base.to_string(),
            }),
            Some(EntityKind::Class | EntityKind::Interface) => match self.registry.get(base) {
                Some(Type::Class(id)) => Ok(*id),
                _ => Err(BindError::UnknownBase {
                    class: class.to_string(),
                    base: base.to_string(),
                }),
            },
            Some(kind) => Err(BindError::BaseNotClass {
                class: class.to_string(),
                base: base.to_string(),
                kind: kind.to_string(),
            }),
        }
    }

    fn resolve_classes(&mut self) -> Result<(), BindError> {
        let decls = self.class_decls();

        for (slot, decl) in decls.iter().enumerate() {
            let id = ClassId::new(slot as u32);
            let mut methods = Vec::new();
            self.resolve_methods(id, decl.name, MethodKind::Instance, decl.methods, &mut methods)?;
            self.resolve_methods(id, decl.name, MethodKind::Static, decl.static_methods, &mut methods)?;

            let base = decl
                .base
                .map(|base| self.resolve_base(decl.name, base))
                .transpose()?;

            let mut iterable = None;
            if let Some(class) = decl.class {
                if let Some(spec) = &class.iterable {
                    let site = format!("class '{}', iterable", decl.name);
                    iterable = Some(self.resolve_type(spec, &site)?);
                }
                self.resolve_constructors(id, decl.name, &class.constructors, &mut methods)?;
                for (prop, spec) in &class.properties {
                    let site = format!("property '{}' of '{}'", prop, decl.name);
                    let ty = self.resolve_type(spec, &site)?;
                    let mut sig = Func::new(ty, Vec::new());
                    sig.is_const = true;
                    methods.push(Method {
                        kind: MethodKind::Property,
                        on: id,
                        id: synthetic_name(decl.name, prop),
                        name: prop.clone(),
                        unique_name: prop.clone(),
                        cpp_name: prop.clone(),
                        sig,
                    });
                }
            }

            let mut seen = FxHashSet::default();
            for method in &methods {
                if !seen.insert(method.unique_name.as_str()) {
                    return Err(BindError::DuplicateMethod {
                        class: decl.name.to_string(),
                        name: method.unique_name.clone(),
                    });
                }
            }

            tracing::trace!(class = decl.name, methods = methods.len(), "resolved class");
            let entry = &mut self.classes[slot];
            entry.methods = methods;
            entry.base = base;
            entry.iterable = iterable;
        }

        for slot in 0..self.classes.len() {
            if let Some(base) = self.classes[slot].base {
                let id = self.classes[slot].id;
                self.classes[base.slot()].subclasses.push(id);
            }
        }

        for class in &self.classes {
            if class.is_shared() && (class.base.is_some() || !class.subclasses.is_empty()) {
                return Err(BindError::SharedWithInheritance {
                    class: class.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn resolve_constructors(
        &self,
        on: ClassId,
        class_name: &str,
        constructors: &IndexMap<String, FunctionSpec>,
        out: &mut Vec<Method>,
    ) -> Result<(), BindError> {
        let class = &self.classes[on.slot()];
        let self_type = if class.is_shared() {
            Type::template(self.well_known.shared_handle.clone(), vec![Type::Class(on)])
        } else {
            Type::Class(on)
        };
        for (name, spec) in constructors {
            let site = format!("constructor '{}' of '{}'", name, class_name);
            let mut sig = self.resolve_func(spec, &site)?;
            let returns_void =
                matches!(&sig.ret, Type::Primitive(id) if self.primitives[id.slot()].name == self.well_known.void);
            if !returns_void {
                return Err(BindError::ConstructorReturnType {
                    class: class_name.to_string(),
                    name: name.clone(),
                });
            }
            sig.ret = self_type.clone();
            out.push(Method {
                kind: MethodKind::Constructor,
                on,
                id: synthetic_name(class_name, name),
                name: name.clone(),
                unique_name: name.clone(),
                cpp_name: class.cpp_name.clone(),
                sig,
            });
        }
        Ok(())
    }

    /// Depth-first from each root in declaration order, parents before children.
    fn order_classes(&self) -> Result<Vec<ClassId>, BindError> {
        let mut visited = vec![false; self.classes.len()];
        let mut order = Vec::with_capacity(self.classes.len());
        for class in self.classes.iter().filter(|c| c.base.is_none()) {
            self.visit(class.id, &mut visited, &mut order)?;
        }
        if let Some(class) = self.classes.iter().find(|c| !visited[c.id.slot()]) {
            return Err(BindError::BaseCycle {
                class: class.name.clone(),
            });
        }
        Ok(order)
    }

    fn visit(
        &self,
        id: ClassId,
        visited: &mut [bool],
        order: &mut Vec<ClassId>,
    ) -> Result<(), BindError> {
        if visited[id.slot()] {
            return Err(BindError::BaseCycle {
                class: self.classes[id.slot()].name.clone(),
            });
        }
        visited[id.slot()] = true;
        order.push(id);
        for sub in &self.classes[id.slot()].subclasses {
            self.visit(*sub, visited, order)?;
        }
        Ok(())
    }

    fn resolve_constants(&self) -> Result<Vec<Constant>, BindError> {
        self.spec
            .constants
            .iter()
            .map(|(name, constant)| {
                let site = format!("constant '{}'", name);
                Ok(Constant {
                    name: name.clone(),
                    ty: self.resolve_type(&constant.ty, &site)?,
                    value: constant.value.clone(),
                })
            })
            .collect()
    }

    fn resolve_mixed_info(&self) -> Result<MixedInfo, BindError> {
        let info = &self.spec.mixed_info;
        let mut getters = Vec::with_capacity(info.getters.len());
        for (data_type, getter) in &info.getters {
            let site = format!("mixed info, data type '{}'", data_type);
            getters.push(MixedGetter {
                data_type: data_type.clone(),
                getter: getter.getter.clone(),
                ty: self.resolve_type(&getter.ty, &site)?,
            });
        }
        let mut ctors = Vec::with_capacity(info.extra_ctors.len() + getters.len());
        for (index, spec) in info.extra_ctors.iter().enumerate() {
            let site = format!("mixed info, extra constructor #{}", index);
            ctors.push(self.resolve_type(spec, &site)?);
        }
        ctors.extend(getters.iter().map(|g| g.ty.clone()));
        Ok(MixedInfo {
            getters,
            unused_data_types: info.unused_data_types.clone(),
            ctors,
        })
    }
}

fn check_async_methods(bound: &BoundSpec) -> Result<(), BindError> {
    for class in &bound.classes {
        for method in &class.methods {
            bound
                .async_transform(&method.sig)
                .map_err(|reason| BindError::MalformedAsync {
                    method: method.id.clone(),
                    reason,
                })?;
        }
    }
    Ok(())
}
