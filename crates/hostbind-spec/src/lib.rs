//! hostbind spec: the loosely-typed document model, the canonical `Spec`, and
//! the normalizer between them.

pub mod errors;
pub mod model;
pub mod normalize;
pub mod relaxed;

pub use errors::{NormalizeError, NormalizeErrorKind};
pub use model::{
    Arity, ClassSpec, ConstantSpec, EnumSpec, FieldSpec, InterfaceSpec, MethodSpec,
    MixedGetterSpec, MixedInfoSpec, RecordSpec, Spec,
};
pub use normalize::normalize_spec;
pub use relaxed::RelaxedSpec;
