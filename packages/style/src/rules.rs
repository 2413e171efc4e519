//! CSS Rule Sets
//!
//! A rule source produces the current snapshot of a dynamically updated rule
//! set. The production pipeline consumes snapshots only; change propagation is
//! the business of the surrounding reactive runtime.

use crate::selector::Selector;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// CSS declarations of one rule, in declaration order.
pub type Properties = IndexMap<String, String>;

/// One rule of a rule-set snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: Selector,
    pub properties: Properties,
}

/// A source of rule-set snapshots.
pub trait RuleSource {
    fn snapshot(&self) -> Vec<StyleRule>;
}

/// A cheap-to-clone handle on a rule source.
///
/// Handles carry identity: clones of the same handle compare equal via
/// [`Rules::same`], which is what theme caching relies upon.
#[derive(Clone)]
pub struct Rules(Rc<dyn RuleSource>);

impl Rules {
    pub fn new(source: impl RuleSource + 'static) -> Self {
        Rules(Rc::new(source))
    }

    /// A fixed rule set.
    pub fn of(rules: Vec<StyleRule>) -> Self {
        Rules(Rc::new(FixedRules(rules)))
    }

    /// An empty rule set.
    pub fn empty() -> Self {
        Rules::of(Vec::new())
    }

    pub fn snapshot(&self) -> Vec<StyleRule> {
        self.0.snapshot()
    }

    /// Whether two handles refer to the very same rule source.
    pub fn same(&self, other: &Rules) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

struct FixedRules(Vec<StyleRule>);

impl RuleSource for FixedRules {
    fn snapshot(&self) -> Vec<StyleRule> {
        self.0.clone()
    }
}

/// Concatenates several rule sets into one.
///
/// The combined set stays live: each snapshot re-reads the combined sources in
/// order.
pub fn combine(sets: Vec<Rules>) -> Rules {
    Rules(Rc::new(CombinedRules(sets)))
}

struct CombinedRules(Vec<Rules>);

impl RuleSource for CombinedRules {
    fn snapshot(&self) -> Vec<StyleRule> {
        self.0.iter().flat_map(|rules| rules.snapshot()).collect()
    }
}

#[derive(Default)]
struct RuleTreeState {
    root_properties: Properties,
    rules: Vec<StyleRule>,
}

/// A mutable rule tree under a single root rule.
///
/// The root rule has no selector of its own. Added rules keep their insertion
/// order in snapshots, after the root rule.
#[derive(Clone, Default)]
pub struct RuleTree(Rc<RefCell<RuleTreeState>>);

impl RuleTree {
    pub fn new() -> Self {
        RuleTree::default()
    }

    pub fn set_root_properties(&self, properties: Properties) {
        self.0.borrow_mut().root_properties = properties;
    }

    pub fn add(&self, selector: Selector, properties: Properties) {
        self.0.borrow_mut().rules.push(StyleRule {
            selector,
            properties,
        });
    }

    /// A live handle on all rules of this tree, the root rule included.
    pub fn rules(&self) -> Rules {
        Rules(Rc::new(self.clone()))
    }
}

impl RuleSource for RuleTree {
    fn snapshot(&self) -> Vec<StyleRule> {
        let state = self.0.borrow();
        let mut snapshot = Vec::with_capacity(state.rules.len() + 1);

        snapshot.push(StyleRule {
            selector: Vec::new(),
            properties: state.root_properties.clone(),
        });
        snapshot.extend(state.rules.iter().cloned());
        snapshot
    }
}
