//! Prelude module for common imports.
//!
//! ```ignore
//! use editor_blocks::prelude::*;
//! ```

// Settings
pub use crate::setting::{ConfigTree, DeprecatedFlag, SettingResolver, SettingSource, resolve};

// Page list
pub use crate::page_list::{
    BlockAttributes, BlockInstanceId, NavigationContext, PageListBlock, PageListOptions,
    PageQuery, PageRecord, RenderSession, RenderedBlock,
};

// Markup
pub use crate::attr::{Attrs, AttrsExt, ClassList};
pub use crate::node::{Element, Node, Text, TextKind};
pub use crate::render::{render_element, render_nodes};
pub use crate::sanitize::{DefaultSanitizer, Sanitizer};

// Error
pub use crate::error::{BlockError, BlockResult};
