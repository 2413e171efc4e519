//! Host Selector Merge Tests

use component_style::host_selector::extend_host_selector;
use component_style::selector::{SelectorItem, SelectorPart, SubSelector};

fn part_of(build: impl FnOnce(&mut SelectorPart)) -> SelectorPart {
    let mut part = SelectorPart::new();

    build(&mut part);
    part
}

fn chain(parts: Vec<SelectorPart>) -> Vec<SelectorItem> {
    parts.into_iter().map(SelectorItem::Part).collect()
}

#[test]
fn should_yield_host_verbatim_for_empty_inner() {
    let host = part_of(|p| {
        p.set_ns("ui");
        p.set_element("host-element");
        p.set_id("host-id");
        p.add_class("host-class");
        p.add_subselector(SubSelector::pseudo_element("after"));
        p.set_suffix(".host-suffix");
    });

    assert_eq!(
        extend_host_selector(&Vec::new(), &host),
        chain(vec![host.clone()])
    );
}

#[test]
fn should_keep_inner_element_and_drop_host_namespace() {
    // The ns/element pair is taken from the inner part as a unit whenever the
    // inner part names either. A host namespace never joins an inner element.
    let inner = chain(vec![part_of(|p| p.set_element("test-element"))]);
    let host = part_of(|p| {
        p.set_ns("ui");
        p.set_element("host-element");
    });

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| p.set_element("test-element"))])
    );
}

#[test]
fn should_keep_inner_namespace_and_drop_host_element() {
    let inner = chain(vec![part_of(|p| p.set_ns("test-ns"))]);
    let host = part_of(|p| p.set_element("host-element"));

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| p.set_ns("test-ns"))])
    );
}

#[test]
fn should_fill_element_pair_from_host() {
    let inner = chain(vec![part_of(|p| p.add_class("test-class"))]);
    let host = part_of(|p| {
        p.set_ns("ui");
        p.set_element("host-element");
    });

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| {
            p.set_ns("ui");
            p.set_element("host-element");
            p.add_class("test-class");
        })])
    );
}

#[test]
fn should_prefer_inner_id() {
    let inner = chain(vec![part_of(|p| p.set_id("test-id"))]);
    let host = part_of(|p| p.set_id("host-id"));

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| p.set_id("test-id"))])
    );
}

#[test]
fn should_fill_id_from_host() {
    let inner = chain(vec![part_of(|p| p.add_class("test-class"))]);
    let host = part_of(|p| p.set_id("host-id"));

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| {
            p.set_id("host-id");
            p.add_class("test-class");
        })])
    );
}

#[test]
fn should_append_host_classes_after_inner_ones() {
    let inner = chain(vec![part_of(|p| {
        p.add_class("test-class");
        p.add_class("other-class");
    })]);
    let host = part_of(|p| p.add_class("host-class"));

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| {
            p.add_class("test-class");
            p.add_class("other-class");
            p.add_class("host-class");
        })])
    );
}

#[test]
fn should_append_host_subselectors_after_inner_ones() {
    let inner = chain(vec![part_of(|p| {
        p.add_subselector(SubSelector::attribute("test-attr"));
    })]);
    let host = part_of(|p| p.add_subselector(SubSelector::pseudo_element("after")));

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| {
            p.add_subselector(SubSelector::attribute("test-attr"));
            p.add_subselector(SubSelector::pseudo_element("after"));
        })])
    );
}

#[test]
fn should_concatenate_suffixes() {
    let inner = chain(vec![part_of(|p| p.set_suffix(".test-suffix"))]);
    let host = part_of(|p| p.set_suffix(".host-suffix"));

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| p.set_suffix(".test-suffix.host-suffix"))])
    );
}

#[test]
fn should_leave_suffix_unset_when_both_absent() {
    let inner = chain(vec![part_of(|p| p.add_class("test-class"))]);
    let host = part_of(|p| p.add_class("host-class"));
    let extended = extend_host_selector(&inner, &host);

    match &extended[0] {
        SelectorItem::Part(part) => assert_eq!(part.suffix, None),
        item => panic!("unexpected item: {:?}", item),
    }
}

#[test]
fn should_take_qualifiers_from_inner_only() {
    let inner = chain(vec![part_of(|p| p.add_qualifier("@inner"))]);
    let host = part_of(|p| {
        p.add_class("host-class");
        p.add_qualifier("@host");
    });

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![part_of(|p| {
            p.add_class("host-class");
            p.add_qualifier("@inner");
        })])
    );
}

#[test]
fn should_leave_rest_of_inner_chain_untouched() {
    let inner = chain(vec![
        part_of(|p| p.add_class("test-class")),
        part_of(|p| p.set_element("nested-element")),
    ]);
    let host = part_of(|p| p.add_class("host-class"));

    assert_eq!(
        extend_host_selector(&inner, &host),
        chain(vec![
            part_of(|p| {
                p.add_class("test-class");
                p.add_class("host-class");
            }),
            part_of(|p| p.set_element("nested-element")),
        ])
    );
}
