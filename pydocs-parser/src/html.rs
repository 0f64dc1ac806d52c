///! Typed tag lookup over parsed HTML documents
///!
///! Every extractor walks its page through `find_tag`, which either returns
///! the first matching descendant or a `ParserError::TagNotFound` naming the
///! tag and filter that failed.

use scraper::ElementRef;
use std::fmt;

use crate::error::ParserError;

/// Tag names the extractors look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HtmlTag {
    Section,
    Div,
    Li,
    A,
    H1,
    Dl,
    Dt,
    Ul,
    Table,
    Tr,
    Abbr,
}

impl HtmlTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            HtmlTag::Section => "section",
            HtmlTag::Div => "div",
            HtmlTag::Li => "li",
            HtmlTag::A => "a",
            HtmlTag::H1 => "h1",
            HtmlTag::Dl => "dl",
            HtmlTag::Dt => "dt",
            HtmlTag::Ul => "ul",
            HtmlTag::Table => "table",
            HtmlTag::Tr => "tr",
            HtmlTag::Abbr => "abbr",
        }
    }
}

impl fmt::Display for HtmlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute-equality filter applied on top of the tag name.
///
/// `class` is matched the way browsers and most HTML tooling do it: the
/// filter value may be either the whole attribute or one of its
/// whitespace-separated tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrFilter {
    attrs: Vec<(&'static str, String)>,
}

impl AttrFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::none().with("id", value)
    }

    pub fn class(value: impl Into<String>) -> Self {
        Self::none().with("class", value)
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let el = element.value();
        self.attrs.iter().all(|(name, expected)| match el.attr(name) {
            Some(actual) if *name == "class" => {
                actual == expected || actual.split_whitespace().any(|token| token == expected)
            }
            Some(actual) => actual == expected,
            None => false,
        })
    }
}

impl fmt::Display for AttrFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=\"{}\"", name, value)?;
        }
        f.write_str("}")
    }
}

/// Element descendants of `node` (the node itself excluded) named `tag`,
/// in document order.
fn descendants_named<'a>(node: ElementRef<'a>, tag: HtmlTag) -> impl Iterator<Item = ElementRef<'a>> {
    node.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name().eq_ignore_ascii_case(tag.as_str()))
}

/// First descendant of `node` named `tag` that satisfies `filter`.
pub fn find_tag<'a>(
    node: ElementRef<'a>,
    tag: HtmlTag,
    filter: &AttrFilter,
) -> Result<ElementRef<'a>, ParserError> {
    descendants_named(node, tag)
        .find(|el| filter.matches(el))
        .ok_or_else(|| ParserError::tag_not_found(tag, filter.to_string()))
}

/// First descendant of `node` named `tag` accepted by `predicate`.
///
/// `description` only feeds the error message.
pub fn find_first_by<'a, F>(
    node: ElementRef<'a>,
    tag: HtmlTag,
    description: &str,
    predicate: F,
) -> Result<ElementRef<'a>, ParserError>
where
    F: Fn(&ElementRef<'a>) -> bool,
{
    descendants_named(node, tag)
        .find(|el| predicate(el))
        .ok_or_else(|| ParserError::tag_not_found(tag, description))
}

/// Every descendant of `node` named `tag` that satisfies `filter`.
pub fn find_all<'a>(node: ElementRef<'a>, tag: HtmlTag, filter: &AttrFilter) -> Vec<ElementRef<'a>> {
    descendants_named(node, tag)
        .filter(|el| filter.matches(el))
        .collect()
}

/// Concatenated text of all descendant text nodes.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Next sibling that is an element, skipping text and comment nodes.
pub fn next_element_sibling<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Trim and fold line breaks into single spaces.
pub fn flatten_lines(text: &str) -> String {
    text.trim().replace('\n', " ")
}
