//! Structured CSS Selectors
//!
//! The selector model produced rules are addressed with: a chain of selector
//! parts joined by combinators, where each part may carry a namespace, element
//! name, identifier, classes, nested sub-selectors, a raw suffix, and
//! qualifiers (metadata tags that never render to CSS text).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Regex for parsing compound host selectors
static HOST_SELECTOR_REGEXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ([-\w]+)\|                      # 1: namespace prefix `ns|`
        |(([.\#]?)[-\w]+)               # 2: tag/class/id, 3: prefix
        |\[([-\w]+)\]                   # 4: attribute sub-selector
        |(::?)([-\w]+)                  # 5: pseudo prefix, 6: pseudo name
        ",
    )
    .unwrap()
});

/// CSS identifiers that need no escaping when rendered
static CSS_IDENT_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[a-zA-Z_][-\w]*$").unwrap());

/// The pseudo-class name recognized as the host marker. Case-sensitive.
pub const HOST_MARKER_NAME: &str = "host";

/// Error raised when a textual host selector can not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorParseError {
    #[error("empty host selector")]
    Empty,
    #[error("unexpected token `{0}` in host selector")]
    UnexpectedToken(String),
}

/// Sub-selector kind: attribute (`[attr]`), pseudo-class (`:name`), or
/// pseudo-element (`::name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubSelectorPrefix {
    Attribute,
    PseudoClass,
    PseudoElement,
}

/// A nested sub-selector attached to a selector part.
///
/// Parameters are full selector chains, e.g. `:host(.themed)` carries one
/// parameter chain `[.themed]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSelector {
    pub prefix: SubSelectorPrefix,
    pub name: String,
    pub params: Vec<Selector>,
}

impl SubSelector {
    pub fn attribute(name: &str) -> Self {
        SubSelector {
            prefix: SubSelectorPrefix::Attribute,
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    pub fn pseudo(name: &str) -> Self {
        SubSelector {
            prefix: SubSelectorPrefix::PseudoClass,
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    pub fn pseudo_element(name: &str) -> Self {
        SubSelector {
            prefix: SubSelectorPrefix::PseudoElement,
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    /// The bare `:host` marker.
    pub fn host() -> Self {
        Self::pseudo(HOST_MARKER_NAME)
    }

    /// A `:host(<param>)` marker with one parameter chain.
    pub fn host_with(param: Selector) -> Self {
        SubSelector {
            prefix: SubSelectorPrefix::PseudoClass,
            name: HOST_MARKER_NAME.to_string(),
            params: vec![param],
        }
    }

    /// Whether this sub-selector is the `:host` marker, parameterized or not.
    pub fn is_host_marker(&self) -> bool {
        self.prefix == SubSelectorPrefix::PseudoClass && self.name == HOST_MARKER_NAME
    }
}

impl fmt::Display for SubSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix {
            SubSelectorPrefix::Attribute => return write!(f, "[{}]", self.name),
            SubSelectorPrefix::PseudoClass => write!(f, ":{}", self.name)?,
            SubSelectorPrefix::PseudoElement => write!(f, "::{}", self.name)?,
        }
        if !self.params.is_empty() {
            write!(f, "(")?;
            for (index, param) in self.params.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", selector_text(param))?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// One structural unit of a selector chain.
///
/// Qualifiers are arbitrary tags attached to the part (e.g. an at-rule
/// context). They travel with the part through host selector rewriting but are
/// never rendered to CSS text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPart {
    pub ns: Option<String>,
    pub element: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub subselectors: Vec<SubSelector>,
    pub suffix: Option<String>,
    pub qualifiers: Vec<String>,
}

impl SelectorPart {
    pub fn new() -> Self {
        SelectorPart::default()
    }

    pub fn set_ns(&mut self, ns: &str) {
        self.ns = Some(ns.to_string());
    }

    pub fn set_element(&mut self, element: &str) {
        self.element = Some(element.to_string());
    }

    pub fn set_id(&mut self, id: &str) {
        self.id = Some(id.to_string());
    }

    pub fn add_class(&mut self, name: &str) {
        self.classes.push(name.to_string());
    }

    pub fn add_subselector(&mut self, subselector: SubSelector) {
        self.subselectors.push(subselector);
    }

    pub fn set_suffix(&mut self, suffix: &str) {
        self.suffix = Some(suffix.to_string());
    }

    pub fn add_qualifier(&mut self, qualifier: &str) {
        self.qualifiers.push(qualifier.to_string());
    }

    /// Whether no field is set at all, qualifiers included.
    pub fn is_empty(&self) -> bool {
        self.is_blank() && self.qualifiers.is_empty()
    }

    /// Whether no renderable field is set. A blank part may still carry
    /// qualifiers.
    pub fn is_blank(&self) -> bool {
        self.ns.is_none()
            && self.element.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.subselectors.is_empty()
            && self.suffix.is_none()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        if let Some(ns) = &self.ns {
            out.push_str(ns);
            out.push('|');
            out.push_str(self.element.as_deref().unwrap_or("*"));
        } else if let Some(element) = &self.element {
            out.push_str(element);
        }
        if let Some(id) = &self.id {
            out.push('#');
            out.push_str(&escape_css_ident(id));
        }
        for class in &self.classes {
            out.push('.');
            out.push_str(&escape_css_ident(class));
        }
        for subselector in &self.subselectors {
            out.push_str(&subselector.to_string());
        }
        if let Some(suffix) = &self.suffix {
            out.push_str(suffix);
        }
        if out.is_empty() {
            // A blank part still has to select something.
            out.push('*');
        }
        write!(f, "{}", out)
    }
}

/// A combinator joining two selector parts. The descendant combinator is
/// implicit between adjacent parts of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    Child,
    NextSibling,
    Sibling,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Child => write!(f, ">"),
            Combinator::NextSibling => write!(f, "+"),
            Combinator::Sibling => write!(f, "~"),
        }
    }
}

/// One item of a selector chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorItem {
    Part(SelectorPart),
    Combinator(Combinator),
}

impl SelectorItem {
    pub fn part(&self) -> Option<&SelectorPart> {
        match self {
            SelectorItem::Part(part) => Some(part),
            SelectorItem::Combinator(_) => None,
        }
    }
}

impl From<SelectorPart> for SelectorItem {
    fn from(part: SelectorPart) -> Self {
        SelectorItem::Part(part)
    }
}

impl From<Combinator> for SelectorItem {
    fn from(combinator: Combinator) -> Self {
        SelectorItem::Combinator(combinator)
    }
}

/// An ordered selector chain.
pub type Selector = Vec<SelectorItem>;

/// Renders a selector chain to CSS text. Adjacent parts are joined by the
/// implicit descendant combinator.
pub fn selector_text(selector: &Selector) -> String {
    let mut out = String::new();
    let mut after_part = false;

    for item in selector {
        match item {
            SelectorItem::Part(part) => {
                if after_part {
                    out.push(' ');
                }
                out.push_str(&part.to_string());
                after_part = true;
            }
            SelectorItem::Combinator(combinator) => {
                out.push_str(&format!(" {} ", combinator));
                after_part = false;
            }
        }
    }
    out
}

/// Escapes a CSS identifier for text rendering.
///
/// Identifiers already matching the CSS ident grammar pass through untouched.
/// Anything else gets its non-ident characters backslash-escaped, so generated
/// class names like `my-element#3@elic` remain valid class selectors.
pub fn escape_css_ident(ident: &str) -> String {
    if CSS_IDENT_REGEXP.is_match(ident) {
        return ident.to_string();
    }

    let mut out = String::with_capacity(ident.len() + 4);

    for ch in ident.chars() {
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

/// Parses one compound selector part from text.
///
/// Supports `ns|element`, `#id`, `.class`, `[attr]`, `:pseudo` and
/// `::pseudo-element` components without spaces or combinators, which is the
/// shape a textual host selector takes.
pub fn parse_host_selector(text: &str) -> Result<SelectorPart, SelectorParseError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(SelectorParseError::Empty);
    }

    let mut part = SelectorPart::new();
    let mut last_end = 0;

    for cap in HOST_SELECTOR_REGEXP.captures_iter(trimmed) {
        let all = cap.get(0).unwrap();

        if all.start() != last_end {
            let skipped = &trimmed[last_end..all.start()];
            return Err(SelectorParseError::UnexpectedToken(skipped.to_string()));
        }
        last_end = all.end();

        if let Some(ns) = cap.get(1) {
            part.set_ns(ns.as_str());
            continue;
        }

        if let Some(tag) = cap.get(2) {
            let prefix = cap.get(3).map(|m| m.as_str()).unwrap_or("");
            match prefix {
                "#" => part.set_id(&tag.as_str()[1..]),
                "." => part.add_class(&tag.as_str()[1..]),
                _ => part.set_element(tag.as_str()),
            }
            continue;
        }

        if let Some(attr) = cap.get(4) {
            part.add_subselector(SubSelector::attribute(attr.as_str()));
            continue;
        }

        if let Some(name) = cap.get(6) {
            let pseudo_prefix = cap.get(5).map(|m| m.as_str()).unwrap_or(":");
            part.add_subselector(if pseudo_prefix == "::" {
                SubSelector::pseudo_element(name.as_str())
            } else {
                SubSelector::pseudo(name.as_str())
            });
        }
    }

    if last_end != trimmed.len() {
        return Err(SelectorParseError::UnexpectedToken(
            trimmed[last_end..].to_string(),
        ));
    }
    if part.is_empty() {
        return Err(SelectorParseError::Empty);
    }

    Ok(part)
}
