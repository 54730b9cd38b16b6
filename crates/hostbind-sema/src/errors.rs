// src/errors.rs
//! Binder errors (E2xxx).
//!
//! Every binder error is fatal to the run: there is no partially bound model.

#![allow(unused_assignments)] // False positives from thiserror derive

use hostbind_identity::EntityKind;
use hostbind_spec::Arity;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum BindError {
    #[error("duplicate name '{name}': already declared as a {existing}, redeclared as a {kind}")]
    #[diagnostic(code(E2001), help("names are shared by every table in a spec"))]
    DuplicateName {
        name: String,
        existing: EntityKind,
        kind: EntityKind,
    },

    #[error("illegal {kind} name '{name}': '_' is not allowed")]
    #[diagnostic(
        code(E2002),
        help("'_' separates entity and member names in generated identifiers")
    )]
    IllegalTypeName { name: String, kind: EntityKind },

    #[error("argument '{name}' in {site} starts with '_', which is reserved")]
    #[diagnostic(code(E2003))]
    ReservedArgName { name: String, site: String },

    #[error("no such type: '{name}' (in {site})")]
    #[diagnostic(
        code(E2004),
        help("declare it as a primitive, record, class, interface, enum, key type, opaque type or alias before it is used")
    )]
    NoSuchType { name: String, site: String },

    #[error("no such template: '{name}' (in {site})")]
    #[diagnostic(code(E2005), help("add it to the 'templates' table with its arity"))]
    NoSuchTemplate { name: String, site: String },

    #[error("template '{name}' takes {expected} argument(s), found {found} (in {site})")]
    #[diagnostic(code(E2006))]
    TemplateArity {
        name: String,
        expected: Arity,
        found: usize,
        site: String,
    },

    #[error("{class} has unknown base {base}")]
    #[diagnostic(code(E2007))]
    UnknownBase { class: String, base: String },

    #[error("bases must be classes, but base '{base}' of '{class}' is a {kind}")]
    #[diagnostic(code(E2008))]
    BaseNotClass {
        class: String,
        base: String,
        kind: String,
    },

    #[error("base class cycle detected at '{class}'")]
    #[diagnostic(code(E2009))]
    BaseCycle { class: String },

    #[error("class '{class}' is shared-pointer wrapped and also takes part in inheritance")]
    #[diagnostic(
        code(E2010),
        help("only a root class without subclasses may set 'sharedPtrWrapped'")
    )]
    SharedWithInheritance { class: String },

    #[error("constructor '{name}' of '{class}' must be declared returning void")]
    #[diagnostic(code(E2011))]
    ConstructorReturnType { class: String, name: String },

    #[error("'{class}' declares more than one member with unique name '{name}'")]
    #[diagnostic(code(E2012), help("give overloads distinct suffixes"))]
    DuplicateMethod { class: String, name: String },

    #[error("malformed async method '{method}': {reason}")]
    #[diagnostic(code(E2013))]
    MalformedAsync {
        method: String,
        reason: AsyncShapeError,
    },
}

/// Ways a trailing-callback signature can fail to be a well-formed async method.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AsyncShapeError {
    #[error("callback argument must be a function type, got '{found}'")]
    CallbackNotFunction { found: String },

    #[error("callback must return void, got '{found}'")]
    CallbackReturnsValue { found: String },

    #[error("callback takes (error) or (result, error), got {found} argument(s)")]
    CallbackArity { found: usize },

    #[error("last callback argument must be an optional/nullable error carrier or a bare carrier primitive, got '{found}'")]
    ErrorCarrier { found: String },
}

/// Types that have no native spelling.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum SpellingError {
    #[error("cannot spell function type '{ty}' natively; wrap it in a function template")]
    #[diagnostic(code(E2101))]
    FunctionType { ty: String },

    #[error("'{ty}' only exists in host signatures and has no native spelling")]
    #[diagnostic(code(E2102))]
    AsyncResult { ty: String },

    #[error("template '{template}' takes a single function type, got '{ty}'")]
    #[diagnostic(code(E2103))]
    FunctionTemplateArgument { template: String, ty: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_base_names_both_classes() {
        let err = BindError::UnknownBase {
            class: "Puppy".to_string(),
            base: "Cat".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Puppy"));
        assert!(text.contains("Cat"));
        assert_eq!(err.code().unwrap().to_string(), "E2007");
    }

    #[test]
    fn arity_message_uses_document_spelling() {
        let err = BindError::TemplateArity {
            name: "std::vector".to_string(),
            expected: Arity::Fixed(1),
            found: 2,
            site: "type alias 'Pair'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "template 'std::vector' takes 1 argument(s), found 2 (in type alias 'Pair')"
        );
    }
}
