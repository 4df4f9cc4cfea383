//! What the page source is expected to deliver.
//!
//! The renderer never reorders records. Sources that cannot sort by menu
//! order and title themselves can run their records through a
//! [`PageQuery`] first.

use rustc_hash::{FxHashMap, FxHashSet};

use super::PageRecord;

/// Filter and ordering applied to raw page records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    child_of: Option<i64>,
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only descendants (at any depth) of `parent_id`
    pub fn child_of(mut self, parent_id: i64) -> Self {
        self.child_of = Some(parent_id);
        self
    }

    /// Ancestor filter, if any
    pub fn parent_filter(&self) -> Option<i64> {
        self.child_of
    }

    /// Filter, then sort stably by menu order and title
    pub fn apply(&self, pages: &[PageRecord]) -> Vec<PageRecord> {
        let mut selected: Vec<PageRecord> = match self.child_of {
            Some(root) => {
                let keep = descendants_of(pages, root);
                pages.iter().filter(|p| keep.contains(&p.id)).cloned().collect()
            }
            None => pages.to_vec(),
        };
        selected.sort_by(|a, b| {
            a.menu_order
                .cmp(&b.menu_order)
                .then_with(|| a.title.cmp(&b.title))
        });
        selected
    }
}

fn descendants_of(pages: &[PageRecord], root: i64) -> FxHashSet<i64> {
    let mut children: FxHashMap<i64, Vec<i64>> = FxHashMap::default();
    for page in pages {
        if let Some(parent) = page.parent() {
            children.entry(parent).or_default().push(page.id);
        }
    }

    let mut found = FxHashSet::default();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        for &child in children.get(&id).map(Vec::as_slice).unwrap_or_default() {
            if child != root && found.insert(child) {
                stack.push(child);
            }
        }
    }
    found
}
