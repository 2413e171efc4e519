//! Style Production Pipeline
//!
//! Takes the current snapshot of a rule set, pushes every rule through the
//! renderer chain and emits the outcome into the render target: either a CSS
//! object model sheet or plain CSS text.

use crate::context::Supply;
use crate::format::ProductionFormat;
use crate::rules::{Properties, Rules};
use crate::selector::{selector_text, Selector};
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

/// How produced CSS is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Render into a CSS object model sheet. Torn down when the style supply
    /// is cut off.
    ObjectModel,
    /// Render as CSS text, the way a `<style>` element body is built. Retained
    /// when the style supply is cut off.
    DomText,
}

/// Selector override passed down the renderer chain.
#[derive(Debug, Clone, Default)]
pub struct RenderOverride {
    pub selector: Option<Selector>,
}

/// Continuation handed to each renderer.
///
/// A renderer reads the current [`selector`](StyleProducer::selector) and
/// calls [`render`](StyleProducer::render) exactly once to pass the rule
/// downstream.
pub trait StyleProducer {
    fn selector(&self) -> &Selector;

    fn render(&mut self, properties: &Properties, override_: RenderOverride);
}

/// One rule of a produced object model sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector_text: String,
    pub properties: Properties,
}

#[derive(Default)]
struct OutputState {
    sheet: Vec<CssRule>,
    css_text: String,
}

/// Shared handle on the produced output.
///
/// Stands in for the DOM attachment point: object model rules accumulate in
/// [`sheet`](StyleOutput::sheet), text rendering appends to
/// [`css_text`](StyleOutput::css_text).
#[derive(Clone, Default)]
pub struct StyleOutput(Rc<RefCell<OutputState>>);

impl StyleOutput {
    pub fn new() -> Self {
        StyleOutput::default()
    }

    pub fn sheet(&self) -> Vec<CssRule> {
        self.0.borrow().sheet.clone()
    }

    pub fn css_text(&self) -> String {
        self.0.borrow().css_text.clone()
    }

    fn emit(&self, target: RenderTarget, selector: &Selector, properties: &Properties) {
        let text = if selector.is_empty() {
            // Nothing replaced the root selector. Scope to the document root.
            ":root".to_string()
        } else {
            selector_text(selector)
        };

        match target {
            RenderTarget::ObjectModel => {
                self.0.borrow_mut().sheet.push(CssRule {
                    selector_text: text,
                    properties: properties.clone(),
                });
            }
            RenderTarget::DomText => {
                let mut state = self.0.borrow_mut();
                let css = &mut state.css_text;

                let _ = write!(css, "{} {{", text);
                for (property, value) in properties {
                    let _ = write!(css, " {}: {};", property, value);
                }
                let _ = writeln!(css, " }}");
            }
        }
    }

    fn clear_sheet(&self) {
        self.0.borrow_mut().sheet.clear();
    }
}

struct RenderChain<'a> {
    renderers: &'a [Rc<dyn crate::renderer::Renderer>],
    index: usize,
    selector: Selector,
    target: RenderTarget,
    output: &'a StyleOutput,
}

impl StyleProducer for RenderChain<'_> {
    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn render(&mut self, properties: &Properties, override_: RenderOverride) {
        if let Some(selector) = override_.selector {
            self.selector = selector;
        }

        if self.index < self.renderers.len() {
            let renderer = self.renderers[self.index].clone();

            self.index += 1;
            renderer.render(self, properties);
        } else {
            self.output.emit(self.target, &self.selector, properties);
        }
    }
}

/// Produces styles for the given rules with the given production format.
///
/// The render pass goes through the format's schedule. Cutting off the
/// returned supply stops production; object model output is torn down on
/// cut-off while CSS text output is retained.
pub fn produce_style(rules: &Rules, format: &ProductionFormat) -> Supply {
    let supply = Supply::new();
    let schedule = (format.scheduler)(format.schedule_options.clone());

    let work_supply = supply.clone();
    let work_rules = rules.clone();
    let renderers = format.renderers.clone();
    let target = format.target;
    let output = format.output.clone();

    schedule(Box::new(move || {
        if work_supply.is_off() {
            return;
        }

        for rule in work_rules.snapshot() {
            let mut chain = RenderChain {
                renderers: &renderers,
                index: 0,
                selector: rule.selector.clone(),
                target,
                output: &output,
            };

            chain.render(&rule.properties, RenderOverride::default());
        }
    }));

    if format.target == RenderTarget::ObjectModel {
        let output = format.output.clone();

        supply.when_off(move || output.clear_sheet());
    }

    supply
}
