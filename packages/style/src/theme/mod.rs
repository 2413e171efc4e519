//! Themes
//!
//! A theme is a hierarchy of CSS rules within a single root. Components
//! extract styling from it through [`Theme::style`], which caches each
//! requested style by provider identity for the lifetime of the theme.

pub mod style;

use crate::rules::{combine, RuleTree, Rules};
use std::cell::RefCell;
use std::collections::HashMap;
use style::{StyleById, StyleId, StyleProvider, ThemeStyle};

/// A theme instance.
///
/// Created through [`crate::context::Registry::new_theme`], which resolves the
/// registered theme styles at construction time.
pub struct Theme {
    root: RuleTree,
    styles: StyleById,
    cache: RefCell<HashMap<StyleId, Rules>>,
}

impl Theme {
    pub(crate) fn new(styles: &[ThemeStyle]) -> Self {
        Theme {
            root: RuleTree::new(),
            styles: StyleById::resolve(styles),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Root rule tree. All theme styling lives under it.
    pub fn root(&self) -> &RuleTree {
        &self.root
    }

    /// Obtains styling for the given styles.
    ///
    /// Each style is applied at most once per theme: a repeated request with
    /// the same provider returns the very same rule set. The effective
    /// provider may differ from the requested one when extensions are
    /// registered, but the cache is always keyed by the requested identity.
    pub fn style(&self, styles: &[StyleProvider]) -> Rules {
        let mut sets = Vec::with_capacity(styles.len());

        for style in styles {
            sets.push(self.style_rules(style));
        }

        if sets.len() == 1 {
            sets.pop().unwrap_or_else(Rules::empty)
        } else {
            combine(sets)
        }
    }

    fn style_rules(&self, style: &StyleProvider) -> Rules {
        let id = style.id();

        if let Some(existing) = self.cache.borrow().get(&id) {
            return existing.clone();
        }

        // Not cached. The provider may query this theme recursively, so the
        // cache borrow is released before invoking it.
        let constructed = self.styles.by_id(style).provide(self);

        self.cache.borrow_mut().insert(id, constructed.clone());
        constructed
    }
}
