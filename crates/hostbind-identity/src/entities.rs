//! First-class identity types for bound entities.
//!
//! Each id is a slot in one of the bound model's arenas. Slots are allocated
//! when a name is registered and filled once every name is known, so an id can
//! be stored in a type before the entity behind it is complete.

use std::fmt;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(u32);

        impl $name {
            pub fn new(index: u32) -> Self {
                Self(index)
            }

            pub fn index(self) -> u32 {
                self.0
            }

            /// Position in the owning arena.
            pub fn slot(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_entity_id! {
    /// Identity for a class or interface
    pub struct ClassId;
}

define_entity_id! {
    /// Identity for a record (struct with public fields, converted by value)
    pub struct StructId;
}

define_entity_id! {
    /// Identity for an enum
    pub struct EnumId;
}

define_entity_id! {
    /// Identity for a key type (newtype over an underlying type)
    pub struct KeyTypeId;
}

define_entity_id! {
    /// Identity for an opaque handle type
    pub struct OpaqueId;
}

define_entity_id! {
    /// Identity for a primitive
    pub struct PrimitiveId;
}

/// What a registered name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Primitive,
    Template,
    Class,
    Interface,
    Record,
    Enum,
    KeyType,
    Opaque,
    TypeAlias,
    /// The `shared_ptr<Class>` alias a shared class registers.
    SharedHandle,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Primitive => "primitive",
            EntityKind::Template => "template",
            EntityKind::Class => "class",
            EntityKind::Interface => "interface",
            EntityKind::Record => "record",
            EntityKind::Enum => "enum",
            EntityKind::KeyType => "key type",
            EntityKind::Opaque => "opaque type",
            EntityKind::TypeAlias => "type alias",
            EntityKind::SharedHandle => "shared handle",
        }
    }

    /// Named entity kinds whose names take part in synthetic names and so may
    /// not contain the reserved separator.
    pub fn is_named_type(&self) -> bool {
        matches!(
            self,
            EntityKind::Class
                | EntityKind::Interface
                | EntityKind::Record
                | EntityKind::Enum
                | EntityKind::KeyType
                | EntityKind::Opaque
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_their_index() {
        let id = ClassId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.slot(), 7);
        assert!(ClassId::new(1) < ClassId::new(2));
    }

    #[test]
    fn named_type_kinds() {
        assert!(EntityKind::Class.is_named_type());
        assert!(EntityKind::Opaque.is_named_type());
        assert!(!EntityKind::Primitive.is_named_type());
        assert!(!EntityKind::TypeAlias.is_named_type());
        assert!(!EntityKind::SharedHandle.is_named_type());
        assert_eq!(EntityKind::KeyType.to_string(), "key type");
    }
}
