//! Component Style Production Format
//!
//! Wires a component context, a render target and a configuration into a
//! production format: the renderer chain (host strategy included), the render
//! schedule and the namespace aliaser the pipeline runs with.

use crate::context::{
    immediate_render_scheduler, ComponentContext, RenderScheduler, RenderWhen, ScheduleOptions,
    Supply,
};
use crate::producer::{produce_style, RenderTarget, StyleOutput};
use crate::renderer::{NoShadowRenderer, Renderer, ShadowRenderer};
use crate::rules::Rules;
use crate::selector::{parse_host_selector, SelectorParseError, SelectorPart};
use std::rc::Rc;

/// Structured or textual host selector. Textual ones are parsed as a single
/// compound selector part.
#[derive(Debug, Clone)]
pub enum HostSelector {
    Part(SelectorPart),
    Text(String),
}

impl From<SelectorPart> for HostSelector {
    fn from(part: SelectorPart) -> Self {
        HostSelector::Part(part)
    }
}

impl From<&str> for HostSelector {
    fn from(text: &str) -> Self {
        HostSelector::Text(text.to_string())
    }
}

/// Configuration of component style production.
#[derive(Clone, Default)]
pub struct FormatConfig {
    /// Selector to use for the component element.
    ///
    /// Modifies the selectors of produced rules. With a shadow root the root
    /// rule selector becomes `:host(<hostSelector>)` and leading host markers
    /// are extended by it. Without a shadow root it substitutes the marker
    /// outright, and is generated as a unique identifying class when omitted.
    ///
    /// Must not itself contain a host marker.
    pub host_selector: Option<HostSelector>,

    /// Render scheduler. The immediate scheduler is used when omitted.
    pub scheduler: Option<RenderScheduler>,

    /// Extra renderers to apply, ahead of the context-registered ones.
    pub renderers: Vec<Rc<dyn Renderer>>,

    /// Where produced CSS lands. A fresh output is created when omitted.
    pub output: Option<StyleOutput>,
}

/// A fully resolved production format, ready for [`produce_style`].
pub struct ProductionFormat {
    pub target: RenderTarget,
    /// Renderer chain, ascending order. Ties keep registration order.
    pub renderers: Vec<Rc<dyn Renderer>>,
    pub scheduler: RenderScheduler,
    pub schedule_options: ScheduleOptions,
    pub output: StyleOutput,
}

/// Component style production format.
///
/// The two render targets share all of the wiring; only emission and teardown
/// differ. Object model rendering waits for element connection by default,
/// text rendering is immediate and may render for a disconnected element.
pub struct ComponentStyleFormat {
    context: Rc<ComponentContext>,
    target: RenderTarget,
}

impl ComponentStyleFormat {
    pub fn new(context: Rc<ComponentContext>, target: RenderTarget) -> Self {
        ComponentStyleFormat { context, target }
    }

    /// The default format: CSS object model rendering.
    pub fn object_model(context: Rc<ComponentContext>) -> Self {
        Self::new(context, RenderTarget::ObjectModel)
    }

    /// CSS text rendering.
    pub fn dom_text(context: Rc<ComponentContext>) -> Self {
        Self::new(context, RenderTarget::DomText)
    }

    pub fn context(&self) -> &Rc<ComponentContext> {
        &self.context
    }

    pub fn target(&self) -> RenderTarget {
        self.target
    }

    /// Assembles the renderer chain for the given configuration: configured
    /// renderers, context-registered renderers, and the host strategy chosen
    /// by the presence of a shadow root.
    ///
    /// The generated identifying class is used exactly when no explicit host
    /// selector is given in no-shadow mode.
    pub fn renderer(
        &self,
        config: &FormatConfig,
    ) -> Result<Vec<Rc<dyn Renderer>>, SelectorParseError> {
        let mut renderers = config.renderers.clone();

        renderers.extend(self.context.renderers());

        let host_selector = match &config.host_selector {
            Some(HostSelector::Part(part)) => Some(part.clone()),
            Some(HostSelector::Text(text)) => Some(parse_host_selector(text)?),
            None => None,
        };

        if self.context.has_shadow_root() {
            renderers.push(Rc::new(ShadowRenderer::new(host_selector)));
        } else {
            let host_selector = host_selector.unwrap_or_else(|| {
                let mut part = SelectorPart::new();

                part.add_class(&self.context.element_id_class());
                part
            });

            renderers.push(Rc::new(NoShadowRenderer::new(host_selector)));
        }

        Ok(renderers)
    }

    /// Builds the production format for the given configuration.
    pub fn format(&self, config: &FormatConfig) -> Result<ProductionFormat, SelectorParseError> {
        let mut renderers = self.renderer(config)?;

        // Stable sort: same-order renderers keep their registration order.
        renderers.sort_by_key(|renderer| renderer.order());

        Ok(ProductionFormat {
            target: self.target,
            renderers,
            scheduler: config
                .scheduler
                .clone()
                .unwrap_or_else(immediate_render_scheduler),
            schedule_options: ScheduleOptions {
                name: None,
                when: match self.target {
                    RenderTarget::ObjectModel => RenderWhen::Connected,
                    RenderTarget::DomText => RenderWhen::Immediate,
                },
            },
            output: config.output.clone().unwrap_or_default(),
        })
    }

    /// Creates a producer function for the given rules.
    ///
    /// The returned producer starts a production pass per call. A component
    /// already destroyed produces nothing: the returned supply is cut off
    /// right away.
    pub fn new_producer(
        &self,
        rules: &Rules,
        config: &FormatConfig,
    ) -> Result<Box<dyn Fn() -> Supply>, SelectorParseError> {
        let format = self.format(config)?;
        let rules = rules.clone();
        let component_supply = self.context.supply().clone();

        Ok(Box::new(move || {
            if component_supply.is_off() {
                return Supply::cut_off();
            }

            produce_style(&rules, &format).needs(&component_supply)
        }))
    }

    /// Produces the component's styles for the given rules.
    ///
    /// Returns the styles supply. Cutting it off stops production and, for
    /// the object model target, removes the produced rules.
    pub fn produce(
        &self,
        rules: &Rules,
        config: &FormatConfig,
    ) -> Result<Supply, SelectorParseError> {
        Ok(self.new_producer(rules, config)?())
    }
}
