#![deny(clippy::all)]

//! Component Style Production
//!
//! Produces CSS for web components from a rule tree authored against an
//! abstract `:host` placeholder. Rule selectors are rewritten so that styles
//! land on the right component instance, whether that instance has a shadow
//! root (native `:host(...)` scoping) or is scoped through a generated unique
//! identifying class. Ships the selector model, the host selector rewriting
//! algorithm, the two render strategies, the production format wiring, and an
//! identity-cached theme layer on top.

pub mod context;
pub mod element_id;
pub mod format;
pub mod host_selector;
pub mod producer;
pub mod renderer;
pub mod rules;
pub mod selector;
pub mod theme;

// Re-exports
pub use context::{ComponentContext, Registry, Supply};
pub use format::{ComponentStyleFormat, FormatConfig, HostSelector};
pub use producer::{produce_style, RenderTarget, StyleOutput};
pub use renderer::Renderer;
pub use rules::{Properties, RuleTree, Rules, StyleRule};
pub use selector::{Combinator, Selector, SelectorItem, SelectorPart, SubSelector};
pub use theme::Theme;
