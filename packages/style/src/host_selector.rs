//! Host Selector Extraction And Merging
//!
//! A rule tree is authored abstractly against a `:host` placeholder. At render
//! time the placeholder is located at the head of each rule selector and
//! merged with the concrete selector scoping the styles to one component
//! instance. Extraction and merging are pure value transformations; the render
//! strategies in [`crate::renderer`] decide how the merged part re-enters the
//! selector chain.

use crate::selector::{Selector, SelectorItem, SelectorPart};

/// Inspects the head of a selector chain for a `:host` or `:host(...)` marker.
///
/// The first chain item must be a part whose only set fields are qualifiers
/// plus a sub-selector list headed by the host marker. Only the first
/// sub-selector of that part is inspected.
///
/// Returns `None` when no marker is found. Otherwise returns the remainder of
/// the chain and the extracted inner selector:
/// - a bare `:host` yields an empty inner selector, or a single
///   qualifiers-only part when the removed part carried qualifiers;
/// - a `:host(<inner>)` yields the parameter chain with its first part's
///   qualifiers overwritten by the removed part's.
///
/// No merging happens here. This is a structural classification step.
pub fn extract_host_selector(selector: &Selector) -> Option<(Selector, Selector)> {
    let first = match selector.first()? {
        SelectorItem::Part(part) => part,
        SelectorItem::Combinator(_) => return None,
    };

    if first.ns.is_some()
        || first.element.is_some()
        || first.id.is_some()
        || !first.classes.is_empty()
        || first.suffix.is_some()
    {
        return None;
    }

    let marker = first.subselectors.first()?;

    if !marker.is_host_marker() {
        return None;
    }

    let rest: Selector = selector[1..].to_vec();
    let inner: Selector = match marker.params.first() {
        Some(param) if !param.is_empty() => {
            let mut inner = param.clone();

            if let SelectorItem::Part(part) = &mut inner[0] {
                part.qualifiers = first.qualifiers.clone();
            }
            inner
        }
        _ => {
            if first.qualifiers.is_empty() {
                Vec::new()
            } else {
                vec![SelectorItem::Part(SelectorPart {
                    qualifiers: first.qualifiers.clone(),
                    ..SelectorPart::default()
                })]
            }
        }
    };

    Some((rest, inner))
}

/// Merges the first part of the extracted inner selector with the host
/// selector part, leaving the rest of the inner chain untouched.
///
/// Each field of the merged part depends solely on the corresponding fields of
/// the two inputs:
/// - namespace and element are taken from the inner part as a unit when either
///   is present there, otherwise both come from the host part;
/// - the inner identifier wins over the host one;
/// - classes and sub-selectors are appended inner-then-host;
/// - suffixes are concatenated, an all-empty result yielding no suffix;
/// - qualifiers come from the inner part alone.
pub fn extend_host_selector(inner: &Selector, host: &SelectorPart) -> Selector {
    let (first, rest) = match inner.split_first() {
        Some((SelectorItem::Part(part), rest)) => (part.clone(), rest),
        Some(_) => (SelectorPart::new(), &inner[..]),
        None => (SelectorPart::new(), &[][..]),
    };

    let inner_names_element = first.element.is_some() || first.ns.is_some();
    let suffix = format!(
        "{}{}",
        first.suffix.as_deref().unwrap_or(""),
        host.suffix.as_deref().unwrap_or(""),
    );

    let merged = SelectorPart {
        ns: if inner_names_element {
            first.ns
        } else {
            host.ns.clone()
        },
        element: if inner_names_element {
            first.element
        } else {
            host.element.clone()
        },
        id: first.id.or_else(|| host.id.clone()),
        classes: if first.classes.is_empty() {
            host.classes.clone()
        } else {
            let mut classes = first.classes;

            classes.extend(host.classes.iter().cloned());
            classes
        },
        subselectors: if first.subselectors.is_empty() {
            host.subselectors.clone()
        } else {
            let mut subselectors = first.subselectors;

            subselectors.extend(host.subselectors.iter().cloned());
            subselectors
        },
        suffix: if suffix.is_empty() { None } else { Some(suffix) },
        qualifiers: first.qualifiers,
    };

    let mut extended: Selector = Vec::with_capacity(rest.len() + 1);

    extended.push(SelectorItem::Part(merged));
    extended.extend(rest.iter().cloned());
    extended
}
