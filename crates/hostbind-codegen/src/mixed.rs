// src/mixed.rs
//
// Per-discriminator cases for the tagged any-native-value primitive. The
// primitive rule for `Mixed` switches over these.

use hostbind_sema::Type;

/// Native -> host: one arm of the switch over the value's data type.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedCase<'a> {
    pub data_type: &'a str,
    pub getter: &'a str,
    pub ty: &'a Type,
    /// The getter's result, already converted to the host.
    pub converted: String,
}

/// Host -> native: one alternative the host value may be constructed from.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedCtor<'a> {
    pub ty: &'a Type,
    pub converted: String,
}
