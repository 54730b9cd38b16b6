// src/normalize.rs
//
// RelaxedSpec -> Spec. Pure: the only effect is returning an error for the
// first malformed entry.

use hostbind_frontend::{FunctionSpec, TypeSpec, parse_type};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::errors::{NormalizeError, NormalizeErrorKind};
use crate::model::{
    ClassSpec, ConstantSpec, EnumSpec, FieldSpec, InterfaceSpec, MethodSpec, MixedGetterSpec,
    MixedInfoSpec, RecordSpec, Spec,
};
use crate::relaxed::{
    EnumValues, OverloadSet, RelaxedClass, RelaxedField, RelaxedInterface, RelaxedMethod,
    RelaxedMixedInfo, RelaxedRecord, RelaxedSpec,
};

/// Where in the document a value came from, for error messages.
struct Site<'a> {
    entity: &'a str,
    field: String,
}

impl<'a> Site<'a> {
    fn new(entity: &'a str, field: impl Into<String>) -> Self {
        Self {
            entity,
            field: field.into(),
        }
    }

    fn error(&self, kind: NormalizeErrorKind) -> NormalizeError {
        NormalizeError::new(self.entity, self.field.clone(), kind)
    }

    fn parse(&self, text: &str) -> Result<TypeSpec, NormalizeError> {
        parse_type(text).map_err(|err| self.error(NormalizeErrorKind::TypeParse(err)))
    }

    fn parse_function(&self, text: &str) -> Result<FunctionSpec, NormalizeError> {
        match self.parse(text)? {
            TypeSpec::Function(func) => Ok(func),
            other => Err(self.error(NormalizeErrorKind::ExpectedFunction {
                found: other.to_string(),
            })),
        }
    }
}

pub fn normalize_spec(spec: RelaxedSpec) -> Result<Spec, NormalizeError> {
    let _span = tracing::debug_span!("normalize_spec").entered();

    let type_aliases = spec
        .type_aliases
        .iter()
        .map(|(name, text)| {
            let entity = format!("type alias '{}'", name);
            Ok((name.clone(), Site::new(&entity, "type").parse(text)?))
        })
        .collect::<Result<IndexMap<_, _>, NormalizeError>>()?;

    let key_types = spec
        .key_types
        .iter()
        .map(|(name, text)| {
            let entity = format!("key type '{}'", name);
            Ok((name.clone(), Site::new(&entity, "underlying type").parse(text)?))
        })
        .collect::<Result<IndexMap<_, _>, NormalizeError>>()?;

    let mut enums = IndexMap::with_capacity(spec.enums.len());
    for (name, relaxed) in spec.enums {
        let values = normalize_enum_values(&name, relaxed.values)?;
        enums.insert(
            name,
            EnumSpec {
                cpp_name: relaxed.cpp_name,
                values,
            },
        );
    }

    let constants = spec
        .constants
        .into_iter()
        .map(|(name, relaxed)| {
            let entity = format!("constant '{}'", name);
            let ty = Site::new(&entity, "type").parse(&relaxed.ty)?;
            let value = value_text(relaxed.value);
            Ok((name, ConstantSpec { ty, value }))
        })
        .collect::<Result<IndexMap<_, _>, NormalizeError>>()?;

    let records = spec
        .records
        .into_iter()
        .map(|(name, relaxed)| {
            let record = normalize_record(&name, relaxed)?;
            Ok((name, record))
        })
        .collect::<Result<IndexMap<_, _>, NormalizeError>>()?;

    let classes = spec
        .classes
        .into_iter()
        .map(|(name, relaxed)| {
            let class = normalize_class(&name, relaxed)?;
            Ok((name, class))
        })
        .collect::<Result<IndexMap<_, _>, NormalizeError>>()?;

    let interfaces = spec
        .interfaces
        .into_iter()
        .map(|(name, relaxed)| {
            let interface = normalize_interface(&name, relaxed)?;
            Ok((name, interface))
        })
        .collect::<Result<IndexMap<_, _>, NormalizeError>>()?;

    let mixed_info = normalize_mixed_info(spec.mixed_info)?;

    tracing::debug!(
        classes = classes.len(),
        interfaces = interfaces.len(),
        records = records.len(),
        enums = enums.len(),
        "normalized spec"
    );

    Ok(Spec {
        headers: spec.headers,
        primitives: spec.primitives,
        templates: spec.templates,
        enums,
        records,
        classes,
        interfaces,
        opaque_types: spec.opaque_types,
        key_types,
        type_aliases,
        constants,
        mixed_info,
    })
}

fn normalize_enum_values(
    name: &str,
    values: EnumValues,
) -> Result<IndexMap<String, i64>, NormalizeError> {
    match values {
        EnumValues::Map(map) => Ok(map),
        EnumValues::List(list) => {
            let mut map = IndexMap::with_capacity(list.len());
            for (value, enumerator) in (0i64..).zip(list) {
                if map.contains_key(&enumerator) {
                    let entity = format!("enum '{}'", name);
                    return Err(Site::new(&entity, "values").error(
                        NormalizeErrorKind::DuplicateEnumerator { name: enumerator },
                    ));
                }
                map.insert(enumerator, value);
            }
            Ok(map)
        }
    }
}

fn normalize_record(name: &str, relaxed: RelaxedRecord) -> Result<RecordSpec, NormalizeError> {
    let entity = format!("record '{}'", name);
    let mut fields = IndexMap::with_capacity(relaxed.fields.len());
    for (field_name, field) in relaxed.fields {
        let site = Site::new(&entity, format!("field '{}'", field_name));
        let spec = match field {
            RelaxedField::Type(text) => FieldSpec {
                ty: site.parse(&text)?,
                cpp_name: None,
                default: None,
            },
            RelaxedField::Full(obj) => FieldSpec {
                ty: site.parse(&obj.ty)?,
                cpp_name: obj.cpp_name,
                default: obj.default.map(value_text),
            },
        };
        fields.insert(field_name, spec);
    }
    Ok(RecordSpec {
        cpp_name: relaxed.cpp_name,
        fields,
    })
}

fn normalize_class(name: &str, relaxed: RelaxedClass) -> Result<ClassSpec, NormalizeError> {
    let entity = format!("class '{}'", name);

    let iterable = relaxed
        .iterable
        .as_deref()
        .map(|text| Site::new(&entity, "iterable").parse(text))
        .transpose()?;

    let mut constructors = IndexMap::with_capacity(relaxed.constructors.len());
    for (ctor_name, text) in &relaxed.constructors {
        let site = Site::new(&entity, format!("constructor '{}'", ctor_name));
        let sig = site.parse_function(text)?;
        if !sig.ret.is_name("void") {
            return Err(site.error(NormalizeErrorKind::ConstructorReturnType {
                found: sig.ret.to_string(),
            }));
        }
        constructors.insert(ctor_name.clone(), sig);
    }

    let properties = relaxed
        .properties
        .iter()
        .map(|(prop, text)| {
            let ty = Site::new(&entity, format!("property '{}'", prop)).parse(text)?;
            Ok((prop.clone(), ty))
        })
        .collect::<Result<IndexMap<_, _>, NormalizeError>>()?;

    Ok(ClassSpec {
        cpp_name: relaxed.cpp_name,
        iterable,
        needs_deref: relaxed.needs_deref || relaxed.shared_ptr_wrapped.is_some(),
        shared_ptr_wrapped: relaxed.shared_ptr_wrapped,
        is_abstract: relaxed.is_abstract,
        base: relaxed.base,
        constructors,
        methods: normalize_methods(&entity, "method", relaxed.methods)?,
        static_methods: normalize_methods(&entity, "static method", relaxed.static_methods)?,
        properties,
    })
}

fn normalize_interface(
    name: &str,
    relaxed: RelaxedInterface,
) -> Result<InterfaceSpec, NormalizeError> {
    let entity = format!("interface '{}'", name);
    Ok(InterfaceSpec {
        cpp_name: relaxed.cpp_name,
        base: relaxed.base,
        shared_ptr_wrapped: relaxed.shared_ptr_wrapped,
        methods: normalize_methods(&entity, "method", relaxed.methods)?,
        static_methods: normalize_methods(&entity, "static method", relaxed.static_methods)?,
    })
}

fn normalize_methods(
    entity: &str,
    what: &str,
    methods: IndexMap<String, OverloadSet>,
) -> Result<IndexMap<String, Vec<MethodSpec>>, NormalizeError> {
    let mut out = IndexMap::with_capacity(methods.len());
    for (name, set) in methods {
        let site = Site::new(entity, format!("{} '{}'", what, name));
        let overloads = set
            .into_vec()
            .into_iter()
            .map(|method| match method {
                RelaxedMethod::Sig(sig) => Ok(MethodSpec {
                    cpp_name: None,
                    suffix: None,
                    sig: site.parse_function(&sig)?,
                }),
                RelaxedMethod::Full(obj) => Ok(MethodSpec {
                    sig: site.parse_function(&obj.sig)?,
                    cpp_name: obj.cpp_name,
                    suffix: obj.suffix,
                }),
            })
            .collect::<Result<Vec<_>, NormalizeError>>()?;
        check_overload_suffixes(&site, &overloads)?;
        out.insert(name, overloads);
    }
    Ok(out)
}

/// At most one overload may go without a suffix, and suffixes are distinct.
fn check_overload_suffixes(site: &Site<'_>, overloads: &[MethodSpec]) -> Result<(), NormalizeError> {
    let mut seen = FxHashSet::default();
    let mut unsuffixed = 0;
    for overload in overloads {
        match &overload.suffix {
            None => {
                unsuffixed += 1;
                if unsuffixed > 1 {
                    return Err(site.error(NormalizeErrorKind::UnsuffixedOverloads));
                }
            }
            Some(suffix) => {
                if !seen.insert(suffix.as_str()) {
                    return Err(site.error(NormalizeErrorKind::DuplicateSuffix {
                        suffix: suffix.clone(),
                    }));
                }
            }
        }
    }
    Ok(())
}

fn normalize_mixed_info(relaxed: RelaxedMixedInfo) -> Result<MixedInfoSpec, NormalizeError> {
    let entity = "mixed info";
    let getters = relaxed
        .data_types
        .into_iter()
        .map(|(data_type, info)| {
            let ty = Site::new(entity, format!("data type '{}'", data_type)).parse(&info.ty)?;
            Ok((
                data_type,
                MixedGetterSpec {
                    getter: info.getter,
                    ty,
                },
            ))
        })
        .collect::<Result<IndexMap<_, _>, NormalizeError>>()?;

    let extra_ctors = relaxed
        .extra_ctors
        .iter()
        .enumerate()
        .map(|(i, text)| Site::new(entity, format!("extra constructor #{}", i)).parse(text))
        .collect::<Result<Vec<_>, NormalizeError>>()?;

    Ok(MixedInfoSpec {
        getters,
        unused_data_types: relaxed.unused_data_types,
        extra_ctors,
    })
}

/// Strings are kept as written; anything else becomes its JSON text.
fn value_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}
