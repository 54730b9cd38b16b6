// src/relaxed.rs
//
// The document as authors write it. Most fields accept more than one shape;
// `normalize` turns them into the canonical model.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::model::Arity;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelaxedSpec {
    pub mixed_info: RelaxedMixedInfo,
    pub headers: Vec<String>,
    pub primitives: Vec<String>,
    pub templates: IndexMap<String, Arity>,
    pub opaque_types: Vec<String>,
    pub enums: IndexMap<String, RelaxedEnum>,
    pub records: IndexMap<String, RelaxedRecord>,
    pub classes: IndexMap<String, RelaxedClass>,
    pub constants: IndexMap<String, RelaxedConstant>,
    pub type_aliases: IndexMap<String, String>,
    pub key_types: IndexMap<String, String>,
    pub interfaces: IndexMap<String, RelaxedInterface>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelaxedMixedInfo {
    pub data_types: IndexMap<String, RelaxedDataType>,
    pub unused_data_types: Vec<String>,
    pub extra_ctors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelaxedDataType {
    #[serde(rename = "type")]
    pub ty: String,
    pub getter: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelaxedEnum {
    pub cpp_name: Option<String>,
    pub values: EnumValues,
}

/// A list counts up from 0; a map gives explicit values.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnumValues {
    List(Vec<String>),
    Map(IndexMap<String, i64>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelaxedRecord {
    pub cpp_name: Option<String>,
    pub fields: IndexMap<String, RelaxedField>,
}

/// A bare string is just the field's type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RelaxedField {
    Type(String),
    Full(RelaxedFieldObject),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelaxedFieldObject {
    #[serde(rename = "type")]
    pub ty: String,
    pub cpp_name: Option<String>,
    /// `Some(Value::Null)` for an explicit `default: null`.
    #[serde(default, deserialize_with = "present")]
    pub default: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelaxedClass {
    pub cpp_name: Option<String>,
    pub iterable: Option<String>,
    pub needs_deref: bool,
    pub shared_ptr_wrapped: Option<String>,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub base: Option<String>,
    pub constructors: IndexMap<String, String>,
    pub methods: IndexMap<String, OverloadSet>,
    pub static_methods: IndexMap<String, OverloadSet>,
    pub properties: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelaxedInterface {
    pub cpp_name: Option<String>,
    pub base: Option<String>,
    pub shared_ptr_wrapped: Option<String>,
    pub methods: IndexMap<String, OverloadSet>,
    pub static_methods: IndexMap<String, OverloadSet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OverloadSet {
    Many(Vec<RelaxedMethod>),
    One(RelaxedMethod),
}

impl OverloadSet {
    pub fn into_vec(self) -> Vec<RelaxedMethod> {
        match self {
            OverloadSet::Many(methods) => methods,
            OverloadSet::One(method) => vec![method],
        }
    }
}

/// A bare string is just the signature.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RelaxedMethod {
    Sig(String),
    Full(RelaxedMethodObject),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelaxedMethodObject {
    pub sig: String,
    pub suffix: Option<String>,
    pub cpp_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelaxedConstant {
    #[serde(rename = "type")]
    pub ty: String,
    pub value: serde_json::Value,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let spec: RelaxedSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.classes.is_empty());
        assert!(spec.mixed_info.data_types.is_empty());
    }

    #[test]
    fn field_shapes() {
        let fields: IndexMap<String, RelaxedField> = serde_json::from_str(
            r#"{"a": "int", "b": {"type": "bool", "default": true}, "c": {"type": "X", "default": null}}"#,
        )
        .unwrap();
        assert!(matches!(&fields["a"], RelaxedField::Type(t) if t == "int"));
        match &fields["b"] {
            RelaxedField::Full(obj) => assert_eq!(obj.default, Some(serde_json::json!(true))),
            _ => panic!("expected full field"),
        }
        match &fields["c"] {
            RelaxedField::Full(obj) => assert_eq!(obj.default, Some(serde_json::Value::Null)),
            _ => panic!("expected full field"),
        }
    }

    #[test]
    fn overload_set_shapes() {
        let methods: IndexMap<String, OverloadSet> = serde_json::from_str(
            r#"{
                "close": "()",
                "get": {"sig": "(k: Key) -> Obj", "cppName": "get_object"},
                "find": [{"sig": "(k: Key) -> Obj", "suffix": "by_key"}, "(n: int) -> Obj"]
            }"#,
        )
        .unwrap();
        assert_eq!(methods["close"].clone().into_vec().len(), 1);
        match methods["get"].clone().into_vec().remove(0) {
            RelaxedMethod::Full(obj) => assert_eq!(obj.cpp_name.as_deref(), Some("get_object")),
            _ => panic!("expected object form"),
        }
        assert_eq!(methods["find"].clone().into_vec().len(), 2);
    }

    #[test]
    fn class_flags_use_document_names() {
        let class: RelaxedClass = serde_json::from_str(
            r#"{"abstract": true, "sharedPtrWrapped": "SharedRealm", "needsDeref": false}"#,
        )
        .unwrap();
        assert!(class.is_abstract);
        assert_eq!(class.shared_ptr_wrapped.as_deref(), Some("SharedRealm"));
    }
}
