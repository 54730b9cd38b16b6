//! hostbind sema: binds a canonical `Spec` into the immutable `BoundSpec`.

mod async_transform;
pub mod binder;
pub mod errors;
pub mod model;
mod registry;
mod resolve;
mod spelling;
pub mod type_display;
pub mod types;
pub mod well_known;

pub use binder::{bind_model, bind_model_with};
pub use errors::{AsyncShapeError, BindError, SpellingError};
pub use model::{
    BoundSpec, Class, Constant, Enum, Enumerator, Field, KeyType, Method, MethodKind, MixedGetter,
    MixedInfo, Opaque, Primitive, Struct,
};
pub use type_display::{display_func, display_type};
pub use types::{Arg, Func, Template, Type};
pub use well_known::WellKnownNames;

pub use hostbind_identity::{ClassId, EntityKind, EnumId, KeyTypeId, OpaqueId, PrimitiveId, StructId};
