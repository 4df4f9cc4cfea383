//! HTML Rendering for markup trees
//!
//! Serializes `Element`/`Node` trees to HTML strings. No whitespace is
//! inserted between nodes, so the output is byte-stable for a given tree.

use crate::attr::Attrs;
use crate::node::{Element, Node};

/// Render an element to an HTML string.
pub fn render_element(elem: &Element) -> String {
    let mut output = String::new();
    write_element(elem, &mut output);
    output
}

/// Render a sequence of sibling nodes to an HTML string.
pub fn render_nodes(nodes: &[Node]) -> String {
    let mut output = String::new();
    for node in nodes {
        write_node(node, &mut output);
    }
    output
}

fn write_element(elem: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&elem.tag);
    write_attrs(&elem.attrs, output);

    // Void elements
    if is_void_element(&elem.tag) {
        output.push_str(" />");
        return;
    }

    output.push('>');
    for child in &elem.children {
        write_node(child, output);
    }
    output.push_str("</");
    output.push_str(&elem.tag);
    output.push('>');
}

fn write_node(node: &Node, output: &mut String) {
    match node {
        Node::Element(elem) => write_element(elem, output),
        Node::Text(text) => {
            if text.is_raw() {
                // Raw text: already sanitized, output as-is
                output.push_str(&text.content);
            } else {
                output.push_str(&escape_html(&text.content));
            }
        }
    }
}

fn write_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs.iter() {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape_attr(value));
        output.push('"');
    }
}

/// Escape HTML special characters in text content.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Check if element is a void element (self-closing).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

// =============================================================================
// Tests
// =============================================================================
