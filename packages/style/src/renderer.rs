//! Rule Renderers
//!
//! Renderers rewrite a rule on its way to emission. They run in ascending
//! order; each one calls the producer continuation exactly once, optionally
//! overriding the rule selector for everything downstream.
//!
//! The two host strategies below run at a fixed low order so they establish
//! the final selector shape before generic renderers see it.

use crate::host_selector::{extend_host_selector, extract_host_selector};
use crate::producer::{RenderOverride, StyleProducer};
use crate::rules::Properties;
use crate::selector::{SelectorItem, SelectorPart, SubSelector};

/// A rule renderer.
pub trait Renderer {
    /// Renderers run in ascending order. Defaults to `0`.
    fn order(&self) -> i32 {
        0
    }

    /// Rewrites the rule and passes it downstream via
    /// [`StyleProducer::render`].
    fn render(&self, producer: &mut dyn StyleProducer, properties: &Properties);
}

/// Order of the host strategy renderers. Runs before generic renderers.
pub const HOST_RENDERER_ORDER: i32 = -100;

/// Host strategy for components with a shadow root.
///
/// The shadow boundary scopes styles by itself, so without an explicit host
/// selector every non-root selector passes through unchanged. With an explicit
/// host selector, a leading `:host`/`:host(...)` is re-wrapped as
/// `:host(<merged>)`.
pub struct ShadowRenderer {
    host_selector: Option<SelectorPart>,
}

impl ShadowRenderer {
    pub fn new(host_selector: Option<SelectorPart>) -> Self {
        ShadowRenderer { host_selector }
    }
}

impl Renderer for ShadowRenderer {
    fn order(&self) -> i32 {
        HOST_RENDERER_ORDER
    }

    fn render(&self, producer: &mut dyn StyleProducer, properties: &Properties) {
        let mut selector = producer.selector().clone();

        if selector.is_empty() {
            // The root rule targets the host itself.
            selector = vec![SelectorItem::Part(match &self.host_selector {
                Some(host) => host.clone(),
                None => host_marker_part(SubSelector::host()),
            })];
        } else if let Some(host) = &self.host_selector {
            if let Some((rest, inner)) = extract_host_selector(&selector) {
                let param = if inner.is_empty() {
                    vec![SelectorItem::Part(host.clone())]
                } else {
                    extend_host_selector(&inner, host)
                };
                let mut rewritten =
                    vec![SelectorItem::Part(host_marker_part(SubSelector::host_with(param)))];

                rewritten.extend(rest);
                selector = rewritten;
            }
        }

        producer.render(
            properties,
            RenderOverride {
                selector: Some(selector),
            },
        );
    }
}

/// Host strategy for components without a shadow root.
///
/// The host selector is always resolved here: either the explicit one, or a
/// part holding the generated unique identifying class. A leading host marker
/// is replaced flat, never re-wrapped; a selector without one gets the host
/// part prepended as an ancestor.
pub struct NoShadowRenderer {
    host_selector: SelectorPart,
}

impl NoShadowRenderer {
    pub fn new(host_selector: SelectorPart) -> Self {
        NoShadowRenderer { host_selector }
    }
}

impl Renderer for NoShadowRenderer {
    fn order(&self) -> i32 {
        HOST_RENDERER_ORDER
    }

    fn render(&self, producer: &mut dyn StyleProducer, properties: &Properties) {
        let mut selector = producer.selector().clone();

        if selector.is_empty() {
            selector = vec![SelectorItem::Part(self.host_selector.clone())];
        } else {
            match extract_host_selector(&selector) {
                Some((rest, inner)) if !inner.is_empty() => {
                    let mut rewritten = extend_host_selector(&inner, &self.host_selector);

                    rewritten.extend(rest);
                    selector = rewritten;
                }
                Some((rest, _)) => {
                    let mut rewritten = vec![SelectorItem::Part(self.host_selector.clone())];

                    rewritten.extend(rest);
                    selector = rewritten;
                }
                None => {
                    let mut rewritten = vec![SelectorItem::Part(self.host_selector.clone())];

                    rewritten.extend(selector);
                    selector = rewritten;
                }
            }
        }

        producer.render(
            properties,
            RenderOverride {
                selector: Some(selector),
            },
        );
    }
}

fn host_marker_part(marker: SubSelector) -> SelectorPart {
    SelectorPart {
        subselectors: vec![marker],
        ..SelectorPart::default()
    }
}
