//! Style Format Test Utils
#![allow(dead_code)]

use component_style::context::{ComponentContext, Registry};
use component_style::format::{ComponentStyleFormat, FormatConfig};
use component_style::producer::{RenderOverride, RenderTarget, StyleProducer};
use component_style::renderer::Renderer;
use component_style::rules::{Properties, Rules, StyleRule};
use component_style::selector::{Selector, SelectorItem, SelectorPart, SubSelector};
use std::cell::RefCell;
use std::rc::Rc;

/// Records the selector it is invoked with and passes the rule through.
pub struct CaptureRenderer {
    pub seen: Rc<RefCell<Option<Selector>>>,
}

impl Renderer for CaptureRenderer {
    fn render(&self, producer: &mut dyn StyleProducer, properties: &Properties) {
        *self.seen.borrow_mut() = Some(producer.selector().clone());
        producer.render(properties, RenderOverride::default());
    }
}

pub struct Fixture {
    pub registry: Rc<Registry>,
    pub context: Rc<ComponentContext>,
    pub format: ComponentStyleFormat,
    seen: Rc<RefCell<Option<Selector>>>,
}

impl Fixture {
    pub fn new(shadow_root: bool) -> Self {
        Self::with_target(shadow_root, RenderTarget::ObjectModel)
    }

    pub fn with_target(shadow_root: bool, target: RenderTarget) -> Self {
        let registry = Registry::new();
        let context = ComponentContext::new(registry.clone(), "test-element", shadow_root);
        let format = ComponentStyleFormat::new(context.clone(), target);

        Fixture {
            registry,
            context,
            format,
            seen: Rc::new(RefCell::new(None)),
        }
    }

    /// Produces a single rule with the given selector and returns the
    /// selector as seen by a pass-through renderer behind the host strategy.
    pub fn produce(&self, selector: Selector, config: FormatConfig) -> Selector {
        let rules = Rules::of(vec![StyleRule {
            selector,
            properties: props(&[("font", "serif")]),
        }]);
        let mut config = config;

        config.renderers.push(Rc::new(CaptureRenderer {
            seen: self.seen.clone(),
        }));
        self.format
            .produce(&rules, &config)
            .expect("style production failed");
        self.seen
            .borrow_mut()
            .take()
            .expect("renderer not invoked")
    }
}

pub fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(property, value)| (property.to_string(), value.to_string()))
        .collect()
}

pub fn part_of(build: impl FnOnce(&mut SelectorPart)) -> SelectorPart {
    let mut part = SelectorPart::new();

    build(&mut part);
    part
}

pub fn chain(parts: Vec<SelectorPart>) -> Selector {
    parts.into_iter().map(SelectorItem::Part).collect()
}

pub fn host_marker() -> SelectorPart {
    part_of(|p| p.add_subselector(SubSelector::host()))
}

pub fn host_marker_with(param: Selector) -> SelectorPart {
    part_of(|p| p.add_subselector(SubSelector::host_with(param)))
}
