// src/well_known.rs
//
// Template and primitive names with built-in meaning. Defaults follow the
// native library's conventions; a config file may override any of them.

use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WellKnownNames {
    /// Optional-value templates (`util::Optional<T>`).
    pub optional: Vec<String>,
    /// Nullable markers (`Nullable<T>`); erased in native spellings.
    pub nullable: Vec<String>,
    /// Shared-ownership handle wrapping shared classes.
    pub shared_handle: String,
    /// Trailing-callback template that marks an async method.
    pub async_callback: String,
    /// Native spelling of the async callback template.
    pub native_async_callback: String,
    /// Future-like result of a transformed async method.
    pub async_result: String,
    /// Marker for arguments that are not exposed to the host.
    pub ignore_argument: String,
    pub void: String,
    /// The tagged any-native-value primitive.
    pub mixed: String,
    /// Types that can report the failure of an async operation.
    pub error_carriers: Vec<String>,
    pub sequence: Vec<String>,
    pub tuple: Vec<String>,
    pub map: Vec<String>,
    /// Templates wrapping one function type, spelled with a signature type.
    pub function: Vec<String>,
    /// Primitive name -> native spelling, where they differ.
    pub primitive_spellings: IndexMap<String, String>,
}

impl Default for WellKnownNames {
    fn default() -> Self {
        let strings = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            optional: strings(&["util::Optional", "std::optional", "Optional"]),
            nullable: strings(&["Nullable"]),
            shared_handle: "std::shared_ptr".to_string(),
            async_callback: "AsyncCallback".to_string(),
            native_async_callback: "util::UniqueFunction".to_string(),
            async_result: "AsyncResult".to_string(),
            ignore_argument: "IgnoreArgument".to_string(),
            void: "void".to_string(),
            mixed: "Mixed".to_string(),
            error_carriers: strings(&["AppError", "Status", "std::error_code", "std::exception_ptr"]),
            sequence: strings(&["std::vector"]),
            tuple: strings(&["std::pair", "std::tuple"]),
            map: strings(&["std::map", "std::unordered_map"]),
            function: strings(&["std::function", "util::UniqueFunction"]),
            primitive_spellings: [
                ("count_t", "size_t"),
                ("EncryptionKey", "std::vector<char>"),
                ("AppError", "app::AppError"),
                ("EJson", "std::string"),
                ("EJsonObj", "std::string"),
                ("EJsonArray", "std::string"),
                ("QueryArg", "mpark::variant<Mixed, std::vector<Mixed>>"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        }
    }
}

impl WellKnownNames {
    pub fn is_optional(&self, template: &str) -> bool {
        self.optional.iter().any(|n| n == template)
    }

    pub fn is_nullable(&self, template: &str) -> bool {
        self.nullable.iter().any(|n| n == template)
    }

    pub fn is_error_carrier(&self, name: &str) -> bool {
        self.error_carriers.iter().any(|n| n == name)
    }

    pub fn is_function_template(&self, template: &str) -> bool {
        self.function.iter().any(|n| n == template)
    }

    /// Templates that only annotate their argument.
    pub fn is_marker(&self, template: &str) -> bool {
        self.is_nullable(template) || template == self.ignore_argument
    }

    pub fn primitive_spelling<'a>(&'a self, name: &'a str) -> &'a str {
        self.primitive_spellings
            .get(name)
            .map_or(name, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_native_conventions() {
        let names = WellKnownNames::default();
        assert!(names.is_optional("util::Optional"));
        assert!(names.is_nullable("Nullable"));
        assert!(names.is_marker("IgnoreArgument"));
        assert!(!names.is_marker("util::Optional"));
        assert!(names.is_error_carrier("std::exception_ptr"));
        assert_eq!(names.primitive_spelling("count_t"), "size_t");
        assert_eq!(names.primitive_spelling("int64_t"), "int64_t");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let names: WellKnownNames =
            serde_yaml::from_str("async_callback: Callback\noptional: [Maybe]\n").unwrap();
        assert_eq!(names.async_callback, "Callback");
        assert_eq!(names.optional, vec!["Maybe".to_string()]);
        assert_eq!(names.async_result, "AsyncResult");
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let result: Result<WellKnownNames, _> = serde_yaml::from_str("asyncCallback: X\n");
        assert!(result.is_err());
    }
}
