//! Host Selector Extraction Tests

use component_style::host_selector::extract_host_selector;
use component_style::selector::{Combinator, SelectorItem, SelectorPart, SubSelector};

fn host_part() -> SelectorPart {
    let mut part = SelectorPart::new();

    part.add_subselector(SubSelector::host());
    part
}

fn element(name: &str) -> SelectorPart {
    let mut part = SelectorPart::new();

    part.set_element(name);
    part
}

fn class_part(name: &str) -> SelectorPart {
    let mut part = SelectorPart::new();

    part.add_class(name);
    part
}

#[test]
fn should_not_extract_from_empty_chain() {
    assert_eq!(extract_host_selector(&Vec::new()), None);
}

#[test]
fn should_not_extract_without_marker() {
    let selector = vec![SelectorItem::Part(element("test-element"))];

    assert_eq!(extract_host_selector(&selector), None);
}

#[test]
fn should_not_extract_from_leading_combinator() {
    let selector = vec![
        SelectorItem::Combinator(Combinator::Child),
        SelectorItem::Part(host_part()),
    ];

    assert_eq!(extract_host_selector(&selector), None);
}

#[test]
fn should_not_extract_when_other_fields_set() {
    let mut part = element("test-element");

    part.add_subselector(SubSelector::host());

    assert_eq!(extract_host_selector(&vec![SelectorItem::Part(part)]), None);

    let mut part = class_part("x");

    part.add_subselector(SubSelector::host());

    assert_eq!(extract_host_selector(&vec![SelectorItem::Part(part)]), None);
}

#[test]
fn should_not_extract_when_marker_is_not_first_subselector() {
    let mut part = SelectorPart::new();

    part.add_subselector(SubSelector::attribute("disabled"));
    part.add_subselector(SubSelector::host());

    assert_eq!(extract_host_selector(&vec![SelectorItem::Part(part)]), None);
}

#[test]
fn should_extract_bare_marker_as_empty_inner() {
    let selector = vec![SelectorItem::Part(host_part())];
    let (rest, inner) = extract_host_selector(&selector).unwrap();

    assert!(rest.is_empty());
    assert!(inner.is_empty());
}

#[test]
fn should_keep_remainder_chain() {
    let selector = vec![
        SelectorItem::Part(host_part()),
        SelectorItem::Part(element("nested-element")),
    ];
    let (rest, inner) = extract_host_selector(&selector).unwrap();

    assert_eq!(rest, vec![SelectorItem::Part(element("nested-element"))]);
    assert!(inner.is_empty());
}

#[test]
fn should_carry_qualifiers_of_bare_marker() {
    let mut part = host_part();

    part.add_qualifier("@media:screen");

    let (rest, inner) = extract_host_selector(&vec![SelectorItem::Part(part)]).unwrap();

    assert!(rest.is_empty());

    let mut expected = SelectorPart::new();

    expected.add_qualifier("@media:screen");
    assert_eq!(inner, vec![SelectorItem::Part(expected)]);
}

#[test]
fn should_extract_parameter_chain() {
    let mut part = SelectorPart::new();

    part.add_subselector(SubSelector::host_with(vec![SelectorItem::Part(
        class_part("test-class"),
    )]));

    let (rest, inner) = extract_host_selector(&vec![SelectorItem::Part(part)]).unwrap();

    assert!(rest.is_empty());
    assert_eq!(inner, vec![SelectorItem::Part(class_part("test-class"))]);
}

#[test]
fn should_overwrite_parameter_qualifiers_with_outer_ones() {
    let mut param_part = class_part("test-class");

    param_part.add_qualifier("@inner");

    let mut part = SelectorPart::new();

    part.add_subselector(SubSelector::host_with(vec![SelectorItem::Part(param_part)]));
    part.add_qualifier("@outer");

    let (_, inner) = extract_host_selector(&vec![SelectorItem::Part(part)]).unwrap();

    let mut expected = class_part("test-class");

    expected.add_qualifier("@outer");
    assert_eq!(inner, vec![SelectorItem::Part(expected)]);
}

#[test]
fn should_treat_empty_parameter_as_bare_marker() {
    let mut part = SelectorPart::new();

    part.add_subselector(SubSelector::host_with(Vec::new()));

    let (rest, inner) = extract_host_selector(&vec![SelectorItem::Part(part)]).unwrap();

    assert!(rest.is_empty());
    assert!(inner.is_empty());
}
