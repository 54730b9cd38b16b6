// src/registry.rs
//
// Name tables local to one binder run.

use hostbind_identity::{EntityKind, is_valid_type_name};
use hostbind_spec::Arity;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::errors::BindError;
use crate::types::Type;

#[derive(Debug, Default)]
pub(crate) struct Registry {
    kinds: FxHashMap<String, EntityKind>,
    pub(crate) types: IndexMap<String, Type>,
    pub(crate) templates: IndexMap<String, Arity>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn claim(&mut self, name: &str, kind: EntityKind) -> Result<(), BindError> {
        if let Some(existing) = self.kinds.get(name) {
            return Err(BindError::DuplicateName {
                name: name.to_string(),
                existing: *existing,
                kind,
            });
        }
        if kind.is_named_type() && !is_valid_type_name(name) {
            return Err(BindError::IllegalTypeName {
                name: name.to_string(),
                kind,
            });
        }
        self.kinds.insert(name.to_string(), kind);
        Ok(())
    }

    pub(crate) fn register_template(&mut self, name: &str, arity: Arity) -> Result<(), BindError> {
        self.claim(name, EntityKind::Template)?;
        self.templates.insert(name.to_string(), arity);
        Ok(())
    }

    pub(crate) fn register(
        &mut self,
        name: &str,
        kind: EntityKind,
        ty: Type,
    ) -> Result<(), BindError> {
        self.claim(name, kind)?;
        tracing::trace!(name, kind = kind.as_str(), "registered");
        self.types.insert(name.to_string(), ty);
        Ok(())
    }

    pub(crate) fn kind_of(&self, name: &str) -> Option<EntityKind> {
        self.kinds.get(name).copied()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub(crate) fn arity(&self, template: &str) -> Option<Arity> {
        self.templates.get(template).copied()
    }
}
