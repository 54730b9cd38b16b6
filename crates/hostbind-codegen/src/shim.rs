// src/shim.rs

use hostbind_identity::RESERVED_ARG_PREFIX;
use hostbind_sema::Func;

use crate::conversion::{ConversionRules, Converter, Direction};
use crate::errors::CodegenResult;

/// Name the shim binds the callee's result to.
pub const SHIM_RESULT: &str = "_result";

/// The pieces of a closure that calls a function living on the other side.
///
/// Converting a native function to the host yields a host closure: its host
/// parameters go `FromHost` into the native call and the result comes back
/// `ToHost`. The opposite direction mirrors this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionShim {
    /// Closure parameter names, one per argument.
    pub params: Vec<String>,
    /// Converted arguments passed to the wrapped function.
    pub args: Vec<String>,
    /// Converted `SHIM_RESULT`; `None` for void functions.
    pub ret: Option<String>,
}

impl FunctionShim {
    pub(crate) fn build<R: ConversionRules>(
        cx: &Converter<'_, R>,
        func: &Func,
        dir: Direction,
    ) -> CodegenResult<Self> {
        let arg_dir = dir.reverse();
        let mut params = Vec::with_capacity(func.args.len());
        let mut args = Vec::with_capacity(func.args.len());
        for arg in &func.args {
            let param = format!("{}{}", RESERVED_ARG_PREFIX, arg.name);
            args.push(cx.convert(&arg.ty, arg_dir, &param)?);
            params.push(param);
        }
        let ret = if cx.spec().is_void(&func.ret) {
            None
        } else {
            Some(cx.convert(&func.ret, dir, SHIM_RESULT)?)
        };
        Ok(Self { params, args, ret })
    }
}
