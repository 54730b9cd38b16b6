// src/templates.rs

use hostbind_sema::WellKnownNames;

/// The fixed set of template rules a backend supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// `std::shared_ptr<Class>`
    SharedHandle,
    Optional,
    /// Only marks a nullable host value; erased natively.
    Nullable,
    Sequence,
    Tuple,
    Map,
    /// A function wrapper such as `std::function<F>`.
    Function,
    AsyncCallback,
    /// Result of an async-transformed signature; host side only.
    AsyncResult,
    IgnoreArgument,
}

impl TemplateKind {
    pub fn classify(well_known: &WellKnownNames, name: &str) -> Option<Self> {
        let kind = if name == well_known.shared_handle {
            TemplateKind::SharedHandle
        } else if well_known.is_optional(name) {
            TemplateKind::Optional
        } else if well_known.is_nullable(name) {
            TemplateKind::Nullable
        } else if well_known.sequence.iter().any(|n| n == name) {
            TemplateKind::Sequence
        } else if well_known.tuple.iter().any(|n| n == name) {
            TemplateKind::Tuple
        } else if well_known.map.iter().any(|n| n == name) {
            TemplateKind::Map
        } else if name == well_known.async_callback {
            TemplateKind::AsyncCallback
        } else if well_known.is_function_template(name) {
            TemplateKind::Function
        } else if name == well_known.async_result {
            TemplateKind::AsyncResult
        } else if name == well_known.ignore_argument {
            TemplateKind::IgnoreArgument
        } else {
            return None;
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_classify() {
        let names = WellKnownNames::default();
        let cases = [
            ("std::shared_ptr", TemplateKind::SharedHandle),
            ("util::Optional", TemplateKind::Optional),
            ("std::optional", TemplateKind::Optional),
            ("Nullable", TemplateKind::Nullable),
            ("std::vector", TemplateKind::Sequence),
            ("std::pair", TemplateKind::Tuple),
            ("std::unordered_map", TemplateKind::Map),
            ("std::function", TemplateKind::Function),
            ("util::UniqueFunction", TemplateKind::Function),
            ("AsyncCallback", TemplateKind::AsyncCallback),
            ("AsyncResult", TemplateKind::AsyncResult),
            ("IgnoreArgument", TemplateKind::IgnoreArgument),
        ];
        for (name, kind) in cases {
            assert_eq!(TemplateKind::classify(&names, name), Some(kind), "{}", name);
        }
        assert_eq!(TemplateKind::classify(&names, "std::deque"), None);
    }
}
