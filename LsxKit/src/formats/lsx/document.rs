//! Canonical LSX tree structures
//!
//! Every LSX document, whatever its region, is held as a tree of [`Element`]s.
//! The representation is sparse: an element without attributes, children or
//! text stores `None` for that field, and the JSON form omits it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered attribute map of an element.
pub type AttrMap = IndexMap<String, String>;

/// A single element of the canonical tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element name.
    pub tag: String,
    /// Attributes in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<AttrMap>,
    /// Child elements in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Element>>,
    /// Trimmed, whitespace-collapsed text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Element {
    /// Creates an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attr: None,
            children: None,
            text: None,
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child appender.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Builder-style text setter.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Whether this element has the given tag.
    #[must_use]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attr.as_ref()?.get(name).map(String::as_str)
    }

    /// Set an attribute. An existing attribute keeps its position; a new one is appended.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let attrs = self.attr.get_or_insert_with(AttrMap::new);
        match attrs.get_mut(&name) {
            Some(existing) => *existing = value,
            None => {
                attrs.insert(name, value);
            }
        }
    }

    /// Remove an attribute, keeping the map sparse.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let attrs = self.attr.as_mut()?;
        let removed = attrs.shift_remove(name);
        if attrs.is_empty() {
            self.attr = None;
        }
        removed
    }

    /// Iterate attributes in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attr
            .iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Child elements (empty slice when there are none).
    #[must_use]
    pub fn children(&self) -> &[Element] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Mutable child elements (empty slice when there are none).
    pub fn children_mut(&mut self) -> &mut [Element] {
        self.children.as_deref_mut().unwrap_or_default()
    }

    /// Whether the element has any children.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Insert a child at `index` (clamped to the child count).
    pub fn insert_child(&mut self, index: usize, child: Element) {
        let children = self.children.get_or_insert_with(Vec::new);
        let index = index.min(children.len());
        children.insert(index, child);
    }

    /// Replace all children; an empty list clears the field.
    pub fn set_children(&mut self, children: Vec<Element>) {
        self.children = if children.is_empty() {
            None
        } else {
            Some(children)
        };
    }

    /// Keep only the children matching `keep`.
    pub fn retain_children<F>(&mut self, keep: F)
    where
        F: FnMut(&Element) -> bool,
    {
        if let Some(children) = self.children.as_mut() {
            children.retain(keep);
            if children.is_empty() {
                self.children = None;
            }
        }
    }

    /// Text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set the text content. Whitespace is collapsed; empty text clears the field.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let collapsed = collapse_whitespace(&text.into());
        self.text = if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        };
    }

    /// Number of elements in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Element::node_count).sum::<usize>()
    }
}

/// Trim and collapse internal runs of whitespace to a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
