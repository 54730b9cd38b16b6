//! Entity identities and naming rules shared by the binder and backends.

pub mod entities;
pub mod names;

pub use entities::{ClassId, EntityKind, EnumId, KeyTypeId, OpaqueId, PrimitiveId, StructId};
pub use names::{
    RESERVED_ARG_PREFIX, RESERVED_SEPARATOR, is_reserved_arg_name, is_valid_type_name,
    synthetic_name,
};
