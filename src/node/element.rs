//! Element type - HTML elements with ordered attributes
//!
//! The core building block of the markup tree.

use compact_str::CompactString;

use crate::attr::{Attrs, AttrsExt, ClassList};

use super::{Children, Node, Text};

// =============================================================================
// Element
// =============================================================================

/// HTML element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// HTML tag name
    pub tag: CompactString,
    /// Element attributes, rendered in insertion order
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Children::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builders
    // ─────────────────────────────────────────────────────────────────────────

    /// Set an attribute, builder style
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Set the `class` attribute from a class list; an empty list sets nothing
    pub fn with_classes(mut self, classes: &ClassList) -> Self {
        if !classes.is_empty() {
            self.attrs.set_attr("class", classes.to_attr_value());
        }
        self
    }

    /// Set the `style` attribute unless the declarations are empty
    pub fn with_style(mut self, style: &str) -> Self {
        if !style.is_empty() {
            self.attrs.set_attr("style", style);
        }
        self
    }

    /// Append a child node, builder style
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append an escaped text child
    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(Text::new(content))
    }

    /// Append a raw (already sanitized) text child
    pub fn with_raw(self, content: impl Into<String>) -> Self {
        self.with_child(Text::raw(content))
    }

    /// Append a child node
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// Check if attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(name)
    }

    /// Check whether the `class` attribute contains a token
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Other helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node types)
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Iterate over child element references
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| n.as_element())
    }

    /// Find the first direct child element with the given tag
    pub fn child_by_tag(&self, tag: &str) -> Option<&Element> {
        self.children_elements().find(|e| e.tag == tag)
    }

    /// Get text content of this element (concatenated from all text nodes)
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(&t.content),
                Node::Element(e) => e.collect_text(buf),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_basics() {
        let elem = Element::new("ul");
        assert_eq!(elem.tag, "ul");
        assert!(elem.is_empty());
        assert_eq!(elem.child_count(), 0);
    }

    #[test]
    fn test_element_builders() {
        let classes: ClassList = ["wp-block-pages-list__item", "has-child"].into_iter().collect();
        let elem = Element::new("li")
            .with_classes(&classes)
            .with_style("")
            .with_child(Element::new("a").with_attr("href", "/a").with_text("A"))
            .with_child(Element::new("ul").with_child(Element::new("li").with_raw("<em>B</em>")));

        assert!(elem.has_class("has-child"));
        assert!(!elem.has_class("has"));
        assert!(!elem.has_attr("style"));
        assert_eq!(elem.child_by_tag("a").and_then(|a| a.get_attr("href")), Some("/a"));
        assert_eq!(elem.text_content(), "A<em>B</em>");
    }
}
