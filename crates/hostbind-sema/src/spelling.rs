// src/spelling.rs
//
// Native (C++) spelling of bound types.

use crate::errors::SpellingError;
use crate::model::BoundSpec;
use crate::type_display::display_type;
use crate::types::{Func, Type};

impl BoundSpec {
    pub fn native_spelling(&self, ty: &Type) -> Result<String, SpellingError> {
        let well_known = &self.well_known;
        Ok(match ty {
            Type::Const(inner) => format!("{} const", self.native_spelling(inner)?),
            Type::Pointer(inner) => format!("{}*", self.native_spelling(inner)?),
            Type::Ref(inner) => format!("{}&", self.native_spelling(inner)?),
            Type::RRef(inner) => format!("{}&&", self.native_spelling(inner)?),
            Type::Func(_) => {
                return Err(SpellingError::FunctionType {
                    ty: display_type(self, ty),
                });
            }
            Type::Template(t) if t.name == well_known.async_result => {
                return Err(SpellingError::AsyncResult {
                    ty: display_type(self, ty),
                });
            }
            Type::Template(t) if well_known.is_marker(&t.name) && t.args.len() == 1 => {
                self.native_spelling(&t.args[0])?
            }
            Type::Template(t)
                if t.name == well_known.async_callback || well_known.is_function_template(&t.name) =>
            {
                let native = if t.name == well_known.async_callback {
                    &well_known.native_async_callback
                } else {
                    &t.name
                };
                match t.args.as_slice() {
                    [Type::Func(func)] => {
                        format!("{}<{}>", native, self.native_function_signature(func)?)
                    }
                    _ => {
                        return Err(SpellingError::FunctionTemplateArgument {
                            template: t.name.clone(),
                            ty: display_type(self, ty),
                        });
                    }
                }
            }
            Type::Template(t) => {
                let args = t
                    .args
                    .iter()
                    .map(|arg| self.native_spelling(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{}<{}>", t.name, args.join(", "))
            }
            Type::Class(id) => self.class(*id).cpp_name.clone(),
            Type::Struct(id) => self.record(*id).cpp_name.clone(),
            Type::Enum(id) => self.enumeration(*id).cpp_name.clone(),
            Type::Opaque(id) => self.opaque(*id).name.clone(),
            Type::KeyType(id) => self.key_type(*id).name.clone(),
            Type::Primitive(id) => well_known
                .primitive_spelling(&self.primitive(*id).name)
                .to_string(),
        })
    }

    /// `R(A, B)`
    pub fn native_function_signature(&self, func: &Func) -> Result<String, SpellingError> {
        let args = func
            .args
            .iter()
            .map(|arg| self.native_spelling(&arg.ty))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}({})", self.native_spelling(&func.ret)?, args.join(", ")))
    }
}
