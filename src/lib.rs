//! editor-blocks - Editor setting resolution and page list rendering
//!
//! ## Core Concepts
//!
//! **Setting cascade**: a dotted setting path is answered by block-specific
//! experimental settings, then global experimental settings, then legacy
//! flags, then a fixed fallback. See [`setting`].
//!
//! **Page list**: flat page records are nested into a forest and rendered
//! as `<ul>/<li>` navigation markup with color and font-size classes. See
//! [`page_list`].
//!
//! ## Modules
//! - `setting`: `ConfigTree`, `SettingResolver`, deprecated flag adapters
//! - `page_list`: records, forest building, styles, markup, `PageListBlock`
//! - `node`: Element/Node/Text markup tree
//! - `render`: HTML serialization
//! - `sanitize`: title and URL sanitization
//! - `attr`: attributes and class lists
//!
//! ## Usage
//!
//! ```
//! use editor_blocks::prelude::*;
//! use serde_json::json;
//!
//! let settings = ConfigTree::new(json!({ "disableCustomColors": true }));
//! assert_eq!(SettingResolver::new(&settings).get_bool("color.custom"), Some(false));
//!
//! let block = PageListBlock::new(BlockAttributes::default(), NavigationContext::default());
//! let mut session = RenderSession::new();
//! let rendered = block.render(&[PageRecord::new(1, "Home", "/")], &mut session);
//! assert!(rendered.html.is_some());
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Setting resolution
pub mod setting;

/// Page list block rendering
pub mod page_list;

/// Node types: Element, Node, Text
pub mod node;

/// HTML rendering
pub mod render;

/// Title and URL sanitization
pub mod sanitize;

/// Attribute types
pub mod attr;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Settings
pub use setting::{ConfigTree, DeprecatedFlag, SettingResolver, SettingSource, resolve};

// Page list
pub use page_list::{
    BlockAttributes, BlockInstanceId, NavigationContext, PageListBlock, PageListOptions,
    PageQuery, PageRecord, RenderSession, RenderedBlock,
};

// Markup
pub use attr::{Attrs, AttrsExt, ClassList};
pub use node::{Element, Node, Text, TextKind};
pub use sanitize::{DefaultSanitizer, Sanitizer};

// Error types
pub use error::{BlockError, BlockResult};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(ConfigTree: Send, Sync);
    assert_impl_all!(SettingResolver<'static>: Send, Sync, Copy);
    assert_impl_all!(PageListBlock: Send, Sync);
    assert_impl_all!(PageRecord: Send, Sync);
    assert_impl_all!(RenderSession: Send, Sync);
    assert_impl_all!(BlockError: Send, Sync);

    #[test]
    fn test_components_are_independent() {
        let settings = ConfigTree::default();
        assert_eq!(resolve("typography.dropCap", "core/page-list", &settings).as_deref(), Some(&serde_json::Value::Bool(true)));

        let block = PageListBlock::new(BlockAttributes::default(), NavigationContext::default());
        assert_eq!(block.render_markup(&[]), None);
    }
}
