//! Element Id Class
//!
//! Components without a shadow root are scoped through a unique identifying
//! class instead of `:host`. The class name is qualified with a dedicated
//! namespace so it can not clash with author classes.

use crate::context::{NamespaceDef, Registry};
use once_cell::sync::Lazy;

/// Namespace the element-id classes belong to.
pub static ELEMENT_ID_CLASS_NS: Lazy<NamespaceDef> = Lazy::new(|| {
    NamespaceDef::new(
        "https://component-style.dev/ns/element-id-class",
        &["elic", "element-id-class"],
    )
});

/// Builds a unique identifying class for a component instance.
///
/// The local name is `{tag}#{seq}` with a monotonically increasing sequence
/// number drawn from the registry, qualified as `{local}@{alias}` through the
/// registry's namespace aliaser. The raw name is not CSS-safe by itself;
/// selector text rendering escapes it.
pub fn element_id_class(registry: &Registry, tag_name: &str) -> String {
    let seq = registry.next_element_id();
    let alias = (registry.ns_alias())(&ELEMENT_ID_CLASS_NS);

    format!("{}#{}@{}", tag_name, seq, alias)
}
