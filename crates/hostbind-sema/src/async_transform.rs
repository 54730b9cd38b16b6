// src/async_transform.rs
//
// `(args..., cb: AsyncCallback<(value: T, err: Optional<E>) -> void>) -> void`
// becomes `(args...) -> AsyncResult<T>`. Derived on request; methods keep
// their declared signatures.

use std::borrow::Cow;

use crate::errors::AsyncShapeError;
use crate::model::BoundSpec;
use crate::type_display::display_type;
use crate::types::{Func, Type};

impl BoundSpec {
    /// `Ok(None)` when `func` is not a trailing-callback async signature.
    pub fn async_transform(&self, func: &Func) -> Result<Option<Func>, AsyncShapeError> {
        let well_known = &self.well_known;
        if !self.is_void(&func.ret) {
            return Ok(None);
        }
        let Some((last, rest)) = func.args.split_last() else {
            return Ok(None);
        };
        let callback = match last.ty.remove_const_ref() {
            Type::Template(t) if t.name == well_known.async_callback => t,
            _ => return Ok(None),
        };

        let callback = match callback.args.as_slice() {
            [Type::Func(callback)] => callback,
            _ => {
                return Err(AsyncShapeError::CallbackNotFunction {
                    found: display_type(self, &last.ty),
                });
            }
        };
        if !self.is_void(&callback.ret) {
            return Err(AsyncShapeError::CallbackReturnsValue {
                found: display_type(self, &callback.ret),
            });
        }

        let result = match callback.args.as_slice() {
            [error] => {
                self.check_error_carrier(&error.ty)?;
                func.ret.clone()
            }
            [value, error] => {
                self.check_error_carrier(&error.ty)?;
                let value = value.ty.remove_const_ref();
                match value {
                    Type::Template(t) if well_known.is_optional(&t.name) && t.args.len() == 1 => {
                        t.args[0].clone()
                    }
                    _ => value.clone(),
                }
            }
            args => return Err(AsyncShapeError::CallbackArity { found: args.len() }),
        };

        Ok(Some(Func {
            ret: Type::template(well_known.async_result.clone(), vec![result]),
            args: rest.to_vec(),
            is_const: func.is_const,
            is_noexcept: func.is_noexcept,
            is_off_thread: func.is_off_thread,
        }))
    }

    /// The transformed signature, or `func` itself when it is not async.
    pub fn async_transform_or_self<'f>(
        &self,
        func: &'f Func,
    ) -> Result<Cow<'f, Func>, AsyncShapeError> {
        Ok(match self.async_transform(func)? {
            Some(transformed) => Cow::Owned(transformed),
            None => Cow::Borrowed(func),
        })
    }

    fn check_error_carrier(&self, ty: &Type) -> Result<(), AsyncShapeError> {
        let ty = ty.remove_const_ref();
        let carrier = match ty {
            Type::Primitive(_) => Some(ty),
            _ => self.optional_or_nullable_inner(ty).map(Type::remove_const_ref),
        };
        let is_carrier = carrier
            .and_then(|carrier| self.type_name(carrier))
            .is_some_and(|name| self.well_known.is_error_carrier(name));
        if is_carrier {
            Ok(())
        } else {
            Err(AsyncShapeError::ErrorCarrier {
                found: display_type(self, ty),
            })
        }
    }
}
