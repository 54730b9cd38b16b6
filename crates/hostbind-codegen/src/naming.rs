// src/naming.rs
//
// Host-facing names. Entities keep their spec names; backends derive display
// names through a convention instead of rewriting the model.

use hostbind_sema::{Class, Enum, Field, KeyType, Method, Opaque, Struct};

pub trait NamingConvention {
    fn type_name(&self, name: &str) -> String;
    fn member_name(&self, name: &str) -> String;
}

/// PascalCase types, camelCase members.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostNaming;

impl NamingConvention for HostNaming {
    fn type_name(&self, name: &str) -> String {
        pascal_case(name)
    }

    fn member_name(&self, name: &str) -> String {
        camel_case(name)
    }
}

pub fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

pub fn camel_case(name: &str) -> String {
    let pascal = pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => pascal,
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An entity's name as the host sees it.
pub trait DisplayName {
    fn display_name(&self, naming: &dyn NamingConvention) -> String;
}

macro_rules! type_display_name {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DisplayName for $ty {
                fn display_name(&self, naming: &dyn NamingConvention) -> String {
                    naming.type_name(&self.name)
                }
            }
        )*
    };
}

type_display_name!(Class, Struct, Enum, KeyType, Opaque);

impl DisplayName for Method {
    fn display_name(&self, naming: &dyn NamingConvention) -> String {
        naming.member_name(&self.unique_name)
    }
}

impl DisplayName for Field {
    fn display_name(&self, naming: &dyn NamingConvention) -> String {
        naming.member_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_members_become_camel_case() {
        assert_eq!(camel_case("log_in"), "logIn");
        assert_eq!(camel_case("get_by_index"), "getByIndex");
        assert_eq!(camel_case("size"), "size");
        assert_eq!(camel_case("IsValid"), "isValid");
    }

    #[test]
    fn types_become_pascal_case() {
        assert_eq!(pascal_case("sync_mode"), "SyncMode");
        assert_eq!(pascal_case("SyncMode"), "SyncMode");
        assert_eq!(HostNaming.type_name("app_config"), "AppConfig");
    }
}
