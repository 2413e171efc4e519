//! Theme Styles
//!
//! A theme style is a provider function declaring part of the theme styling.
//! The provider function doubles as the identity of the style: caching and
//! extension resolution are keyed by which closure it is, not by what it does.

use crate::rules::{combine, Rules};
use crate::theme::Theme;
use indexmap::IndexMap;
use std::rc::Rc;

/// Identity of a style provider.
///
/// Derived from the provider's closure pointer: clones of one provider share
/// an id, while two structurally identical but separately created closures are
/// distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleId(usize);

/// Theme style provider function.
///
/// Called at most once per theme to apply styling, e.g. by declaring rules
/// against the theme root. Cheap to clone; clones share identity.
#[derive(Clone)]
pub struct StyleProvider(Rc<dyn Fn(&Theme) -> Rules>);

impl StyleProvider {
    pub fn new(provide: impl Fn(&Theme) -> Rules + 'static) -> Self {
        StyleProvider(Rc::new(provide))
    }

    pub fn id(&self) -> StyleId {
        StyleId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn provide(&self, theme: &Theme) -> Rules {
        (self.0)(theme)
    }
}

/// A theme style declaration registered in the registry.
pub enum ThemeStyle {
    /// A style provider on its own.
    Provider(StyleProvider),
    /// An extension of another style. Applied after the style it extends,
    /// whenever that style is requested.
    Extension {
        style: StyleProvider,
        provide: StyleProvider,
    },
}

/// Registered styles resolved into combined providers, keyed by the identity
/// of the base provider.
pub(crate) struct StyleById {
    providers: IndexMap<StyleId, (StyleProvider, bool)>,
}

impl StyleById {
    /// Folds declarations in registration order.
    ///
    /// An extension registered before its base style ends up applied after it
    /// anyway: once the base arrives it is combined in front. Multiple
    /// extensions of one base concatenate in registration order.
    pub(crate) fn resolve(styles: &[ThemeStyle]) -> Self {
        let mut providers: IndexMap<StyleId, (StyleProvider, bool)> = IndexMap::new();

        for style in styles {
            let (key, provider, is_base) = match style {
                ThemeStyle::Provider(provider) => (provider.id(), provider.clone(), true),
                ThemeStyle::Extension { style, provide } => {
                    (style.id(), provide.clone(), false)
                }
            };

            let existing = providers.get(&key).cloned();

            match existing {
                None => {
                    providers.insert(key, (provider, is_base));
                }
                Some((existing, has_base)) => {
                    let combined = if is_base {
                        combine_providers(&provider, &existing)
                    } else {
                        combine_providers(&existing, &provider)
                    };

                    providers.insert(key, (combined, is_base || has_base));
                }
            }
        }

        StyleById { providers }
    }

    /// The effective provider for the given style identity.
    ///
    /// An unregistered style is its own effective provider. A style with only
    /// extensions registered is applied first, extensions after.
    pub(crate) fn by_id(&self, style: &StyleProvider) -> StyleProvider {
        match self.providers.get(&style.id()) {
            None => style.clone(),
            Some((provider, true)) => provider.clone(),
            Some((provider, false)) => combine_providers(style, provider),
        }
    }
}

fn combine_providers(first: &StyleProvider, second: &StyleProvider) -> StyleProvider {
    let first = first.clone();
    let second = second.clone();

    StyleProvider::new(move |theme| combine(vec![first.provide(theme), second.provide(theme)]))
}
