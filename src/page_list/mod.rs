//! Server-side rendering of the page list block.
//!
//! ## Pipeline
//!
//! 1. [`forest`]: classify records as top level or child, group by parent,
//!    nest depth-first
//! 2. [`style`]: color and font-size classes, once per render
//! 3. [`markup`]: `<li>` trees with navigation classes and overlay colors
//!    on the first submenu level
//! 4. [`crate::render`]: serialize inside the `<ul>` wrapper
//!
//! ```
//! use editor_blocks::page_list::{BlockAttributes, NavigationContext, PageListBlock, PageRecord};
//!
//! let pages = [
//!     PageRecord::new(1, "Home", "/"),
//!     PageRecord::new(2, "About", "/about/").with_parent(1),
//! ];
//! let block = PageListBlock::new(BlockAttributes::default(), NavigationContext::default());
//! let html = block.render_markup(&pages).unwrap();
//! assert!(html.starts_with(r#"<ul class="wp-block-page-list"><li class="wp-block-pages-list__item has-child">"#));
//! ```

pub mod forest;
pub mod markup;
pub mod query;
pub mod style;

pub use forest::{PageForest, PageNode, active_ancestor_ids, treat_as_child};
pub use markup::SubmenuMode;
pub use query::PageQuery;
pub use style::{
    BlockAttributes, ColorStyle, CssValue, FontSizeStyle, NavigationContext, build_css_colors,
    build_css_font_sizes, to_kebab_case,
};

use std::fmt;

use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::attr::ClassList;
use crate::error::{BlockError, BlockResult};
use crate::node::Element;
use crate::render::render_element;
use crate::sanitize::{DefaultSanitizer, Sanitizer};

use markup::ItemBuilder;

/// Class on the outer `<ul>`.
pub const WRAPPER_CLASS: &str = "wp-block-page-list";

// =============================================================================
// PageRecord
// =============================================================================

/// A page as delivered by the page source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Page id, unique among the records
    pub id: i64,
    /// Parent page id; `None` or `0` means top level
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Title, may carry inline markup
    pub title: String,
    /// Permalink
    #[serde(default)]
    pub link: String,
    /// Whether this is the page being viewed
    #[serde(default)]
    pub is_active: bool,
    /// Only used by [`PageQuery`] ordering
    #[serde(default)]
    pub menu_order: i64,
}

impl PageRecord {
    /// Create a top-level, inactive page
    pub fn new(id: i64, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id,
            parent_id: None,
            title: title.into(),
            link: link.into(),
            is_active: false,
            menu_order: 0,
        }
    }

    /// Set the parent page id
    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the menu order used by [`PageQuery`]
    pub fn with_menu_order(mut self, menu_order: i64) -> Self {
        self.menu_order = menu_order;
        self
    }

    /// Mark as the page being viewed
    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// Parent id, with `0` normalized to `None`
    pub fn parent(&self) -> Option<i64> {
        self.parent_id.filter(|&id| id != 0)
    }

    /// Decode a JSON array of page records
    pub fn list_from_json(json: &str) -> BlockResult<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| BlockError::invalid_json("page records", e))
    }
}

// =============================================================================
// Render session
// =============================================================================

/// Identifier of one rendered block instance on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockInstanceId(u32);

impl BlockInstanceId {
    /// Raw counter value
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-page render state: hands out increasing block instance ids.
///
/// Owned by the caller for the lifetime of one page render, so separate
/// page renders never share a counter.
#[derive(Debug, Clone, Default)]
pub struct RenderSession {
    rendered: u32,
}

impl RenderSession {
    /// Start a page render with no instances handed out
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next instance id; the first is 1
    pub fn next_instance(&mut self) -> BlockInstanceId {
        self.rendered += 1;
        BlockInstanceId(self.rendered)
    }

    /// Number of instances handed out so far
    pub fn rendered(&self) -> u32 {
        self.rendered
    }
}

/// Output of one block render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    /// Instance id claimed for this render
    pub instance: BlockInstanceId,
    /// `None` when there were no pages to show
    pub html: Option<String>,
}

// =============================================================================
// Options
// =============================================================================

/// Per-request inputs that do not come from block attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageListOptions {
    /// Parent whose children are promoted in only-child-pages mode
    pub root_parent_id: Option<i64>,
    /// Ancestors of the active page; derived from the records when `None`
    pub active_ancestor_ids: Option<Vec<i64>>,
}

impl PageListOptions {
    /// Options with no root parent and derived ancestors
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root parent id directly
    pub fn with_root_parent(mut self, root_parent_id: i64) -> Self {
        self.root_parent_id = Some(root_parent_id);
        self
    }

    /// Root the list at the current page: its parent if it has one, else
    /// the page itself
    pub fn with_current_page(mut self, page_id: i64, parent_id: Option<i64>) -> Self {
        self.root_parent_id = Some(parent_id.filter(|&id| id != 0).unwrap_or(page_id));
        self
    }

    /// Supply the active page's ancestors instead of deriving them
    pub fn with_active_ancestors(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.active_ancestor_ids = Some(ids.into_iter().collect());
        self
    }
}

// =============================================================================
// PageListBlock
// =============================================================================

/// A configured page list block, ready to render page records.
#[derive(Debug, Clone)]
pub struct PageListBlock<S = DefaultSanitizer> {
    attributes: BlockAttributes,
    context: NavigationContext,
    options: PageListOptions,
    sanitizer: S,
}

impl PageListBlock {
    /// Create a block using the default sanitizer
    pub fn new(attributes: BlockAttributes, context: NavigationContext) -> Self {
        Self {
            attributes,
            context,
            options: PageListOptions::default(),
            sanitizer: DefaultSanitizer,
        }
    }
}

impl<S: Sanitizer> PageListBlock<S> {
    /// Replace the per-request options
    pub fn with_options(mut self, options: PageListOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap the sanitizer used for titles and links
    pub fn with_sanitizer<T: Sanitizer>(self, sanitizer: T) -> PageListBlock<T> {
        PageListBlock {
            attributes: self.attributes,
            context: self.context,
            options: self.options,
            sanitizer,
        }
    }

    /// Block attributes as decoded
    pub fn attributes(&self) -> &BlockAttributes {
        &self.attributes
    }

    /// Per-request options
    pub fn options(&self) -> &PageListOptions {
        &self.options
    }

    /// Whether only the children of the root parent are listed
    pub fn only_child_pages(&self) -> bool {
        self.attributes.show_only_child_pages.unwrap_or(false)
    }

    /// Explicit attribute, else whether any navigation context was inherited
    pub fn is_navigation_child(&self) -> bool {
        self.attributes
            .is_navigation_child
            .unwrap_or_else(|| !self.context.is_empty())
    }

    /// Submenu behaviour derived from the attributes and context
    pub fn submenu_mode(&self) -> SubmenuMode {
        SubmenuMode {
            is_navigation_child: self.is_navigation_child(),
            open_on_click: self.attributes.open_submenus_on_click.unwrap_or(false),
            show_icons: self.attributes.show_submenu_icon.unwrap_or(false),
        }
    }

    /// The query a page source should run for this block
    pub fn query(&self) -> PageQuery {
        match self.options.root_parent_id {
            Some(root) if self.only_child_pages() && root != 0 => PageQuery::new().child_of(root),
            _ => PageQuery::new(),
        }
    }

    /// Render with the next instance id from `session`
    pub fn render(&self, pages: &[PageRecord], session: &mut RenderSession) -> RenderedBlock {
        let instance = session.next_instance();
        RenderedBlock {
            instance,
            html: self.render_markup(pages),
        }
    }

    /// Render pages to markup; `None` when there is nothing to show
    pub fn render_markup(&self, pages: &[PageRecord]) -> Option<String> {
        if pages.is_empty() {
            debug!("page list has no pages, rendering nothing");
            return None;
        }

        let forest = PageForest::build(pages, self.only_child_pages(), self.options.root_parent_id);

        let ancestors: FxHashSet<i64> = match &self.options.active_ancestor_ids {
            Some(ids) => ids.iter().copied().collect(),
            None => active_ancestor_ids(pages).into_iter().collect(),
        };

        let colors = build_css_colors(&self.attributes, &self.context);
        let font_sizes = build_css_font_sizes(&self.context);

        let mut wrapper_classes = ClassList::new().with(WRAPPER_CLASS);
        wrapper_classes.extend_from(&colors.css_classes);
        wrapper_classes.extend_from(&font_sizes.css_classes);
        let wrapper_style = format!("{}{}", colors.inline_styles, font_sizes.inline_styles);

        let items = ItemBuilder {
            forest: &forest,
            colors: &colors,
            ancestors: &ancestors,
            mode: self.submenu_mode(),
            sanitizer: &self.sanitizer,
        }
        .build();

        debug!(
            pages = pages.len(),
            nested = forest.len(),
            top_level = forest.roots().len(),
            navigation_child = self.is_navigation_child(),
            "rendering page list"
        );

        let mut wrapper = Element::new("ul")
            .with_classes(&wrapper_classes)
            .with_style(&wrapper_style);
        wrapper.children.extend(items);
        Some(render_element(&wrapper))
    }
}
