//! Contexts And Collaborator Contracts
//!
//! The registry plays the role of the bootstrap context: it owns the unique
//! element-id counter, the namespace aliaser and the registered theme styles.
//! A component context hangs off a registry and carries everything scoped to
//! one component instance. Both are plain single-threaded values; the host
//! environment is an event-driven UI runtime without preemptive concurrency.

use crate::element_id;
use crate::renderer::Renderer;
use crate::theme::style::ThemeStyle;
use crate::theme::Theme;
use once_cell::unsync::OnceCell;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A cancellation token.
///
/// Styles produced under a supply are meant to live for as long as the supply
/// does. Cutting the supply off stops production; registered callbacks run
/// once, immediately when already cut off.
#[derive(Clone, Default)]
pub struct Supply(Rc<RefCell<SupplyState>>);

#[derive(Default)]
struct SupplyState {
    is_off: bool,
    callbacks: Vec<Box<dyn FnOnce()>>,
}

impl Supply {
    pub fn new() -> Self {
        Supply::default()
    }

    /// A supply that is already cut off.
    pub fn cut_off() -> Self {
        let supply = Supply::new();

        supply.off();
        supply
    }

    pub fn is_off(&self) -> bool {
        self.0.borrow().is_off
    }

    /// Cuts the supply off and runs pending callbacks. Subsequent calls do
    /// nothing.
    pub fn off(&self) {
        let callbacks = {
            let mut state = self.0.borrow_mut();

            if state.is_off {
                return;
            }
            state.is_off = true;
            std::mem::take(&mut state.callbacks)
        };

        for callback in callbacks {
            callback();
        }
    }

    /// Registers a cut-off callback.
    pub fn when_off(&self, callback: impl FnOnce() + 'static) {
        {
            let mut state = self.0.borrow_mut();

            if !state.is_off {
                state.callbacks.push(Box::new(callback));
                return;
            }
        }
        callback();
    }

    /// Makes this supply depend on another one: when `other` is cut off, this
    /// supply is cut off too.
    pub fn needs(self, other: &Supply) -> Self {
        let dependent = self.clone();

        other.when_off(move || dependent.off());
        self
    }
}

/// When a render schedule executes its work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderWhen {
    /// As soon as the work is scheduled.
    #[default]
    Immediate,
    /// Once the component element is connected to a document.
    Connected,
}

/// Configuration passed to a render scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleOptions {
    pub name: Option<String>,
    pub when: RenderWhen,
}

/// A callback-batching schedule obtained from a scheduler.
pub type Schedule = Rc<dyn Fn(Box<dyn FnOnce()>)>;

/// Maps schedule options to a schedule. The production pipeline only supplies
/// configuration; scheduling itself belongs to the host environment.
pub type RenderScheduler = Rc<dyn Fn(ScheduleOptions) -> Schedule>;

/// A scheduler running all scheduled work inline.
pub fn immediate_render_scheduler() -> RenderScheduler {
    Rc::new(|_options| Rc::new(|work: Box<dyn FnOnce()>| work()))
}

/// A namespace definition: a unique URL plus preferred alias names, most
/// preferred first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDef {
    pub url: String,
    pub aliases: Vec<String>,
}

impl NamespaceDef {
    pub fn new(url: &str, aliases: &[&str]) -> Self {
        NamespaceDef {
            url: url.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        }
    }
}

/// Maps a namespace definition to its short alias.
pub type NamespaceAliaser = Rc<dyn Fn(&NamespaceDef) -> String>;

/// Creates a namespace aliaser assigning each namespace URL a stable alias:
/// the first preferred alias not taken yet, or a numbered variant of the most
/// preferred one.
pub fn new_namespace_aliaser() -> NamespaceAliaser {
    let assigned: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    let taken: RefCell<HashSet<String>> = RefCell::new(HashSet::new());

    Rc::new(move |ns: &NamespaceDef| {
        if let Some(alias) = assigned.borrow().get(&ns.url) {
            return alias.clone();
        }

        let preferred = ns
            .aliases
            .first()
            .cloned()
            .unwrap_or_else(|| "ns".to_string());
        let mut taken = taken.borrow_mut();
        let alias = ns
            .aliases
            .iter()
            .find(|alias| !taken.contains(*alias))
            .cloned()
            .unwrap_or_else(|| {
                let mut seq = 2;

                loop {
                    let candidate = format!("{}{}", preferred, seq);

                    if !taken.contains(&candidate) {
                        break candidate;
                    }
                    seq += 1;
                }
            });

        taken.insert(alias.clone());
        assigned.borrow_mut().insert(ns.url.clone(), alias.clone());
        alias
    })
}

/// The application-level registry.
///
/// Owns the monotonic element-id sequence, so unique identifying classes are
/// an explicit piece of application state rather than a module-level global.
pub struct Registry {
    element_id_seq: Cell<u64>,
    ns_alias: NamespaceAliaser,
    theme_styles: RefCell<Vec<ThemeStyle>>,
}

impl Registry {
    pub fn new() -> Rc<Self> {
        Rc::new(Registry {
            element_id_seq: Cell::new(0),
            ns_alias: new_namespace_aliaser(),
            theme_styles: RefCell::new(Vec::new()),
        })
    }

    pub fn ns_alias(&self) -> NamespaceAliaser {
        self.ns_alias.clone()
    }

    /// The next value of the element-id sequence. Starts at 1.
    pub(crate) fn next_element_id(&self) -> u64 {
        let next = self.element_id_seq.get() + 1;

        self.element_id_seq.set(next);
        next
    }

    /// Registers a theme style. Styles apply to themes created afterwards.
    pub fn register_theme_style(&self, style: ThemeStyle) {
        self.theme_styles.borrow_mut().push(style);
    }

    /// Creates a new theme with all registered styles resolved.
    pub fn new_theme(self: &Rc<Self>) -> Theme {
        Theme::new(&self.theme_styles.borrow())
    }
}

/// Per-component-instance context.
pub struct ComponentContext {
    registry: Rc<Registry>,
    tag_name: String,
    shadow_root: bool,
    renderers: RefCell<Vec<Rc<dyn Renderer>>>,
    supply: Supply,
    element_id: OnceCell<String>,
}

impl ComponentContext {
    pub fn new(registry: Rc<Registry>, tag_name: &str, shadow_root: bool) -> Rc<Self> {
        Rc::new(ComponentContext {
            registry,
            tag_name: tag_name.to_string(),
            shadow_root,
            renderers: RefCell::new(Vec::new()),
            supply: Supply::new(),
            element_id: OnceCell::new(),
        })
    }

    pub fn registry(&self) -> &Rc<Registry> {
        &self.registry
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Whether the component element has a shadow root attached.
    pub fn has_shadow_root(&self) -> bool {
        self.shadow_root
    }

    /// The component supply. Cut off when the component is destroyed.
    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    /// Registers a renderer applied to every rule produced for this component.
    pub fn add_renderer(&self, renderer: Rc<dyn Renderer>) {
        self.renderers.borrow_mut().push(renderer);
    }

    pub(crate) fn renderers(&self) -> Vec<Rc<dyn Renderer>> {
        self.renderers.borrow().clone()
    }

    /// The unique identifying class of this component instance.
    ///
    /// Created on first access and stable afterwards.
    pub fn element_id_class(&self) -> String {
        self.element_id
            .get_or_init(|| element_id::element_id_class(&self.registry, &self.tag_name))
            .clone()
    }
}
