// src/model.rs
//
// Canonical specification: every type-bearing string parsed, every overload
// set a list, every enum an explicit name -> value table.

use std::fmt;

use hostbind_frontend::{FunctionSpec, TypeSpec};
use indexmap::IndexMap;
use serde::Deserialize;

/// How many arguments a template takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawArity")]
pub enum Arity {
    Fixed(usize),
    /// Written `*` in documents.
    Any,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => *n == count,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Any => f.write_str("*"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawArity {
    Count(usize),
    Text(String),
}

impl TryFrom<RawArity> for Arity {
    type Error = String;

    fn try_from(raw: RawArity) -> Result<Self, Self::Error> {
        match raw {
            RawArity::Count(n) => Ok(Arity::Fixed(n)),
            RawArity::Text(text) if text == "*" => Ok(Arity::Any),
            RawArity::Text(text) => Err(format!(
                "template arity must be a number or \"*\", found \"{}\"",
                text
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spec {
    pub headers: Vec<String>,
    pub primitives: Vec<String>,
    pub templates: IndexMap<String, Arity>,
    pub enums: IndexMap<String, EnumSpec>,
    pub records: IndexMap<String, RecordSpec>,
    pub classes: IndexMap<String, ClassSpec>,
    pub interfaces: IndexMap<String, InterfaceSpec>,
    pub opaque_types: Vec<String>,
    /// Key type name -> underlying type.
    pub key_types: IndexMap<String, TypeSpec>,
    pub type_aliases: IndexMap<String, TypeSpec>,
    pub constants: IndexMap<String, ConstantSpec>,
    pub mixed_info: MixedInfoSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumSpec {
    pub cpp_name: Option<String>,
    pub values: IndexMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSpec {
    pub cpp_name: Option<String>,
    pub fields: IndexMap<String, FieldSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub ty: TypeSpec,
    pub cpp_name: Option<String>,
    /// Default value as source text; non-string document values are kept as JSON.
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassSpec {
    pub cpp_name: Option<String>,
    pub iterable: Option<TypeSpec>,
    pub needs_deref: bool,
    /// Name under which `shared_ptr<Self>` is registered.
    pub shared_ptr_wrapped: Option<String>,
    pub is_abstract: bool,
    pub base: Option<String>,
    pub constructors: IndexMap<String, FunctionSpec>,
    pub methods: IndexMap<String, Vec<MethodSpec>>,
    pub static_methods: IndexMap<String, Vec<MethodSpec>>,
    pub properties: IndexMap<String, TypeSpec>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterfaceSpec {
    pub cpp_name: Option<String>,
    pub base: Option<String>,
    pub shared_ptr_wrapped: Option<String>,
    pub methods: IndexMap<String, Vec<MethodSpec>>,
    pub static_methods: IndexMap<String, Vec<MethodSpec>>,
}

/// One overload of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub cpp_name: Option<String>,
    pub suffix: Option<String>,
    pub sig: FunctionSpec,
}

impl MethodSpec {
    /// `name_suffix`, or `name` for the unsuffixed overload.
    pub fn unique_name(&self, name: &str) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}_{}", name, suffix),
            None => name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantSpec {
    pub ty: TypeSpec,
    pub value: String,
}

/// How the tagged any-value type maps each discriminator to a concrete type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MixedInfoSpec {
    pub getters: IndexMap<String, MixedGetterSpec>,
    pub unused_data_types: Vec<String>,
    pub extra_ctors: Vec<TypeSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixedGetterSpec {
    pub getter: String,
    pub ty: TypeSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_accepts_counts() {
        assert!(Arity::Fixed(2).accepts(2));
        assert!(!Arity::Fixed(2).accepts(1));
        assert!(Arity::Any.accepts(0));
        assert!(Arity::Any.accepts(7));
    }

    #[test]
    fn arity_from_document_values() {
        let fixed: Arity = serde_json::from_str("1").unwrap();
        let any: Arity = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(fixed, Arity::Fixed(1));
        assert_eq!(any, Arity::Any);
        assert!(serde_json::from_str::<Arity>("\"two\"").is_err());
        assert_eq!(Arity::Any.to_string(), "*");
    }

    #[test]
    fn unique_name_appends_suffix() {
        let sig = FunctionSpec::new(vec![], TypeSpec::void());
        let plain = MethodSpec {
            cpp_name: None,
            suffix: None,
            sig: sig.clone(),
        };
        let suffixed = MethodSpec {
            cpp_name: None,
            suffix: Some("with_key".to_string()),
            sig,
        };
        assert_eq!(plain.unique_name("get"), "get");
        assert_eq!(suffixed.unique_name("get"), "get_with_key");
    }
}
