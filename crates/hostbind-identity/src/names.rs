//! Reserved characters in entity and argument names.
//!
//! Synthetic names such as method ids are built as `<Entity>_<member>`, so a
//! named type must not contain the separator. Argument names starting with the
//! reserved prefix belong to generated code.

pub const RESERVED_SEPARATOR: char = '_';
pub const RESERVED_ARG_PREFIX: char = '_';

pub fn is_valid_type_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(RESERVED_SEPARATOR)
}

pub fn is_reserved_arg_name(name: &str) -> bool {
    name.starts_with(RESERVED_ARG_PREFIX)
}

/// `<owner>_<member>`
pub fn synthetic_name(owner: &str, member: &str) -> String {
    format!("{}{}{}", owner, RESERVED_SEPARATOR, member)
}
