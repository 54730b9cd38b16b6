//! hostbind codegen: the type-directed conversion protocol and the plumbing
//! backends use to emit files.

mod backend;
mod conversion;
pub mod errors;
mod mixed;
pub mod naming;
mod output;
mod shim;
mod templates;

pub use backend::{Backend, run_backends};
pub use conversion::{ConversionRules, Converter, Direction, ValueAccess};
pub use errors::{CodegenError, CodegenErrorKind, CodegenResult};
pub use mixed::{MixedCase, MixedCtor};
pub use naming::{DisplayName, HostNaming, NamingConvention};
pub use output::{DirectoryWriter, MemoryWriter, OutputWriter};
pub use shim::{FunctionShim, SHIM_RESULT};
pub use templates::TemplateKind;
