//! Attribute system for markup elements
//!
//! - Direct `Vec<(String, String)>` for attributes
//! - `ClassList` for ordered, space-joined `class` tokens

use compact_str::CompactString;
use smallvec::SmallVec;

/// Element attributes as simple key-value pairs, in emission order
pub type Attrs = Vec<(String, String)>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }
}

// =============================================================================
// ClassList
// =============================================================================

/// Ordered list of CSS class tokens.
///
/// Insertion order is kept, empty tokens are ignored. Duplicates are kept
/// as-is so the emitted attribute mirrors exactly what was pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: SmallVec<[CompactString; 6]>,
}

impl ClassList {
    /// Create an empty class list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a class token
    pub fn push(&mut self, class: impl Into<CompactString>) {
        let class = class.into();
        if !class.is_empty() {
            self.tokens.push(class);
        }
    }

    /// Append a class token, builder style
    pub fn with(mut self, class: impl Into<CompactString>) -> Self {
        self.push(class);
        self
    }

    /// Append every token of another list
    pub fn extend_from(&mut self, other: &ClassList) {
        self.tokens.extend(other.tokens.iter().cloned());
    }

    /// Check whether a token is present
    pub fn contains(&self, class: &str) -> bool {
        self.tokens.iter().any(|t| t == class)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Iterate over the tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_str())
    }

    /// Join the tokens into a `class` attribute value
    pub fn to_attr_value(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(token);
        }
        out
    }
}

impl<S: Into<CompactString>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for class in iter {
            list.push(class);
        }
        list
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_operations() {
        let mut attrs: Attrs = Vec::new();

        // Set
        attrs.set_attr("href", "/about");
        attrs.set_attr("class", "wp-block-pages-list__item__link");
        assert_eq!(attrs.len(), 2);

        // Get
        assert_eq!(attrs.get_attr("href"), Some("/about"));
        assert_eq!(attrs.get_attr("style"), None);

        // Update existing
        attrs.set_attr("href", "/contact");
        assert_eq!(attrs.get_attr("href"), Some("/contact"));
        assert_eq!(attrs.len(), 2);

        // Remove
        assert_eq!(attrs.remove_attr("href").as_deref(), Some("/contact"));
        assert!(!attrs.has_attr("href"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_class_list_joins_in_order() {
        let mut classes = ClassList::new().with("has-text-color").with("");
        classes.push("has-vivid-red-color");
        assert_eq!(classes.len(), 2);
        assert_eq!(classes.to_attr_value(), "has-text-color has-vivid-red-color");
        assert!(classes.contains("has-text-color"));
        assert!(!classes.contains("has-background"));
    }

    #[test]
    fn test_class_list_extend_and_collect() {
        let mut base: ClassList = ["a", "b"].into_iter().collect();
        let more: ClassList = ["c"].into_iter().collect();
        base.extend_from(&more);
        assert_eq!(base.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(ClassList::new().to_attr_value(), "");
    }
}
