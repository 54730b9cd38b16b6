// src/conversion.rs
//
// The recursive conversion walk. `Converter` owns the dispatch over `Type`;
// backends only supply the leaves through `ConversionRules`.

use hostbind_sema::{
    BoundSpec, Class, Enum, Func, KeyType, Opaque, Primitive, Struct, Template, Type,
};

use crate::errors::{CodegenError, CodegenResult};
use crate::mixed::{MixedCase, MixedCtor};
use crate::shim::FunctionShim;
use crate::templates::TemplateKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Native value -> host value.
    ToHost,
    /// Host value -> native value.
    FromHost,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::ToHost => Direction::FromHost,
            Direction::FromHost => Direction::ToHost,
        }
    }
}

/// How a class value reaches the native side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueAccess {
    Plain,
    /// Behind `&&`: the native side takes ownership.
    Moved,
}

/// Per-backend emission vocabulary. Each method returns the text of an
/// expression producing the converted value of `expr`.
pub trait ConversionRules: Sized {
    fn primitive(
        &self,
        cx: &Converter<'_, Self>,
        primitive: &Primitive,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String>;

    /// `inner*`. Nullability is only ever declared through a template, so the
    /// pointee can be assumed valid.
    fn pointer(
        &self,
        cx: &Converter<'_, Self>,
        inner: &Type,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String>;

    fn template(
        &self,
        cx: &Converter<'_, Self>,
        kind: TemplateKind,
        template: &Template,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String>;

    fn class(
        &self,
        cx: &Converter<'_, Self>,
        class: &Class,
        access: ValueAccess,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String>;

    fn record(
        &self,
        cx: &Converter<'_, Self>,
        record: &Struct,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String>;

    fn enumeration(
        &self,
        cx: &Converter<'_, Self>,
        enumeration: &Enum,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String>;

    fn opaque(
        &self,
        cx: &Converter<'_, Self>,
        opaque: &Opaque,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String>;

    /// Key types convert as their underlying type unless a backend says otherwise.
    fn key_type(
        &self,
        cx: &Converter<'_, Self>,
        key: &KeyType,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String> {
        cx.convert(&key.underlying, dir, expr)
    }

    /// Wrap `expr` in a closure that crosses to the other side; `shim` holds
    /// the already converted arguments and result.
    fn function(
        &self,
        cx: &Converter<'_, Self>,
        func: &Func,
        shim: &FunctionShim,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String>;

    fn unknown_template(
        &self,
        _cx: &Converter<'_, Self>,
        template: &Template,
        _dir: Direction,
        _expr: &str,
    ) -> CodegenResult<String> {
        Err(CodegenError::unsupported_template(&template.name))
    }
}

pub struct Converter<'a, R> {
    spec: &'a BoundSpec,
    rules: &'a R,
}

impl<'a, R: ConversionRules> Converter<'a, R> {
    pub fn new(spec: &'a BoundSpec, rules: &'a R) -> Self {
        Self { spec, rules }
    }

    pub fn spec(&self) -> &'a BoundSpec {
        self.spec
    }

    pub fn to_host(&self, ty: &Type, expr: &str) -> CodegenResult<String> {
        self.convert(ty, Direction::ToHost, expr)
    }

    pub fn from_host(&self, ty: &Type, expr: &str) -> CodegenResult<String> {
        self.convert(ty, Direction::FromHost, expr)
    }

    pub fn convert(&self, ty: &Type, dir: Direction, expr: &str) -> CodegenResult<String> {
        self.convert_with(ty, dir, expr, ValueAccess::Plain)
    }

    fn convert_with(
        &self,
        ty: &Type,
        dir: Direction,
        expr: &str,
        access: ValueAccess,
    ) -> CodegenResult<String> {
        let spec = self.spec;
        let rules = self.rules;
        match ty {
            Type::Const(inner) | Type::Ref(inner) => self.convert_with(inner, dir, expr, access),
            Type::RRef(inner) => {
                let access = match dir {
                    Direction::FromHost => ValueAccess::Moved,
                    Direction::ToHost => access,
                };
                self.convert_with(inner, dir, expr, access)
            }
            Type::Pointer(inner) => rules.pointer(self, inner, dir, expr),
            Type::Func(func) => {
                let shim = FunctionShim::build(self, func, dir)?;
                rules.function(self, func, &shim, dir, expr)
            }
            Type::Template(template) => {
                match TemplateKind::classify(spec.well_known(), &template.name) {
                    Some(kind) => rules.template(self, kind, template, dir, expr),
                    None => rules.unknown_template(self, template, dir, expr),
                }
            }
            Type::Class(id) => rules.class(self, spec.class(*id), access, dir, expr),
            Type::Struct(id) => {
                let record = spec.record(*id);
                if dir == Direction::ToHost && record.fields.iter().any(|f| f.ty.contains_function())
                {
                    return Err(CodegenError::one_way_record(&record.name));
                }
                rules.record(self, record, dir, expr)
            }
            Type::Enum(id) => rules.enumeration(self, spec.enumeration(*id), dir, expr),
            Type::Opaque(id) => rules.opaque(self, spec.opaque(*id), dir, expr),
            Type::KeyType(id) => rules.key_type(self, spec.key_type(*id), dir, expr),
            Type::Primitive(id) => rules.primitive(self, spec.primitive(*id), dir, expr),
        }
    }

    /// Convert argument `index` of `template`, as template rules do for their
    /// element types.
    pub fn convert_arg(
        &self,
        template: &Template,
        index: usize,
        dir: Direction,
        expr: &str,
    ) -> CodegenResult<String> {
        let arg = template.args.get(index).ok_or_else(|| {
            CodegenError::missing_template_argument(&template.name, index, template.args.len())
        })?;
        self.convert(arg, dir, expr)
    }

    /// One case per mixed data type, reading the value through its getter.
    pub fn mixed_cases(&self, expr: &str) -> CodegenResult<Vec<MixedCase<'a>>> {
        self.spec
            .mixed_info()
            .getters
            .iter()
            .map(|getter| {
                let value = format!("{}.{}()", expr, getter.getter);
                Ok(MixedCase {
                    data_type: &getter.data_type,
                    getter: &getter.getter,
                    ty: &getter.ty,
                    converted: self.to_host(&getter.ty, &value)?,
                })
            })
            .collect()
    }

    /// One case per type a mixed value can be constructed from.
    pub fn mixed_ctors(&self, expr: &str) -> CodegenResult<Vec<MixedCtor<'a>>> {
        self.spec
            .mixed_info()
            .ctors
            .iter()
            .map(|ty| {
                Ok(MixedCtor {
                    ty,
                    converted: self.from_host(ty, expr)?,
                })
            })
            .collect()
    }
}
