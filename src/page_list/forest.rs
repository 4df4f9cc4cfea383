//! Page forest: flat records → nested tree.
//!
//! Records are first classified as top level or child, children are grouped
//! by parent id, then nested depth-first into an arena. Input order is
//! preserved at every level; a record whose id repeats replaces the earlier
//! one in place.

use std::collections::hash_map::Entry;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::PageRecord;

/// Decide whether a page nests under its parent.
///
/// Pages without a parent are top level. In only-child-pages mode, pages
/// whose parent is the root parent are top level too, since the root itself
/// is not listed.
pub fn treat_as_child(parent_id: Option<i64>, only_child_pages: bool, root_parent_id: Option<i64>) -> bool {
    let Some(parent_id) = parent_id.filter(|&id| id != 0) else {
        return false;
    };

    if only_child_pages && root_parent_id == Some(parent_id) {
        return false;
    }

    true
}

/// Record indices at one level, keyed by page id for in-place replacement.
#[derive(Debug, Default)]
struct Level {
    order: Vec<usize>,
    slots: FxHashMap<i64, usize>,
}

impl Level {
    fn insert(&mut self, page_id: i64, record: usize) {
        match self.slots.entry(page_id) {
            Entry::Occupied(slot) => self.order[*slot.get()] = record,
            Entry::Vacant(slot) => {
                slot.insert(self.order.len());
                self.order.push(record);
            }
        }
    }
}

/// A page in the forest.
#[derive(Debug, Clone)]
pub struct PageNode<'p> {
    /// The record this node stands for
    pub page: &'p PageRecord,
    /// Arena indices of the children, in input order
    pub children: SmallVec<[usize; 4]>,
}

impl PageNode<'_> {
    /// Whether any page nests under this one
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Arena of nested pages borrowed from the input records.
#[derive(Debug, Clone, Default)]
pub struct PageForest<'p> {
    nodes: Vec<PageNode<'p>>,
    roots: Vec<usize>,
}

impl<'p> PageForest<'p> {
    /// Classify, group and nest `pages`.
    ///
    /// Input is expected to be acyclic. A parent chain that loops back onto
    /// itself is cut where it would revisit a page on the current path.
    pub fn build(pages: &'p [PageRecord], only_child_pages: bool, root_parent_id: Option<i64>) -> Self {
        let mut top_level = Level::default();
        let mut groups: FxHashMap<i64, Level> = FxHashMap::default();

        for (record, page) in pages.iter().enumerate() {
            // A page listed as its own parent is top level.
            match page.parent().filter(|&parent| parent != page.id) {
                Some(parent) if treat_as_child(Some(parent), only_child_pages, root_parent_id) => {
                    groups.entry(parent).or_default().insert(page.id, record);
                }
                _ => top_level.insert(page.id, record),
            }
        }

        let mut forest = Self {
            nodes: Vec::with_capacity(pages.len()),
            roots: Vec::new(),
        };
        let mut path = FxHashSet::default();
        forest.roots = forest.nest(pages, &top_level.order, &groups, &mut path);
        forest
    }

    fn nest(
        &mut self,
        pages: &'p [PageRecord],
        level: &[usize],
        groups: &FxHashMap<i64, Level>,
        path: &mut FxHashSet<i64>,
    ) -> Vec<usize> {
        let mut indices = Vec::with_capacity(level.len());
        for &record in level {
            let page = &pages[record];
            let index = self.nodes.len();
            self.nodes.push(PageNode {
                page,
                children: SmallVec::new(),
            });
            indices.push(index);

            let Some(group) = groups.get(&page.id) else {
                continue;
            };
            if !path.insert(page.id) {
                continue;
            }
            let children = self.nest(pages, &group.order, groups, path);
            path.remove(&page.id);
            self.nodes[index].children = children.into_iter().collect();
        }
        indices
    }

    /// Arena indices of the top-level pages
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Node at an arena index
    pub fn node(&self, index: usize) -> &PageNode<'p> {
        &self.nodes[index]
    }

    /// Number of pages reachable from the top level
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no page is reachable
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visit every node depth-first with its depth (top level is 0)
    #[cfg(test)]
    fn walk(&self, mut visit: impl FnMut(&PageNode<'p>, usize)) {
        fn go<'p>(forest: &PageForest<'p>, level: &[usize], depth: usize, visit: &mut impl FnMut(&PageNode<'p>, usize)) {
            for &index in level {
                let node = forest.node(index);
                visit(node, depth);
                go(forest, &node.children, depth + 1, visit);
            }
        }
        go(self, &self.roots, 0, &mut visit);
    }
}

/// Ancestor ids of the active page, nearest first.
///
/// Walks parent links through `pages`; the last active record wins. Stops
/// at the first parent that is not listed or that was already visited.
pub fn active_ancestor_ids(pages: &[PageRecord]) -> Vec<i64> {
    let Some(active) = pages.iter().rev().find(|p| p.is_active) else {
        return Vec::new();
    };

    let parents: FxHashMap<i64, Option<i64>> = pages.iter().map(|p| (p.id, p.parent())).collect();

    let mut ancestors = Vec::new();
    let mut seen = FxHashSet::default();
    seen.insert(active.id);
    let mut next = active.parent();
    while let Some(id) = next {
        if !seen.insert(id) {
            break;
        }
        ancestors.push(id);
        next = parents.get(&id).copied().flatten();
    }
    ancestors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: i64, parent: i64) -> PageRecord {
        PageRecord::new(id, format!("Page {id}"), format!("/page-{id}/")).with_parent(parent)
    }

    fn outline(forest: &PageForest<'_>) -> Vec<(i64, usize)> {
        let mut out = Vec::new();
        forest.walk(|node, depth| out.push((node.page.id, depth)));
        out
    }

    #[test]
    fn test_treat_as_child() {
        assert!(!treat_as_child(None, false, None));
        assert!(!treat_as_child(Some(0), true, Some(0)));
        assert!(treat_as_child(Some(4), false, Some(4)));
        assert!(!treat_as_child(Some(4), true, Some(4)));
        assert!(treat_as_child(Some(5), true, Some(4)));
        assert!(treat_as_child(Some(5), true, None));
    }

    #[test]
    fn test_nests_children_in_input_order() {
        let pages = [page(1, 0), page(2, 1), page(3, 1)];
        let forest = PageForest::build(&pages, false, None);

        assert_eq!(forest.roots().len(), 1);
        let root = forest.node(forest.roots()[0]);
        assert_eq!(root.page.id, 1);
        let children: Vec<_> = root.children.iter().map(|&i| forest.node(i).page.id).collect();
        assert_eq!(children, [2, 3]);
        assert_eq!(outline(&forest), [(1, 0), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_children_listed_before_parent() {
        let pages = [page(3, 2), page(2, 1), page(1, 0), page(4, 0)];
        let forest = PageForest::build(&pages, false, None);
        assert_eq!(outline(&forest), [(1, 0), (2, 1), (3, 2), (4, 0)]);
    }

    #[test]
    fn test_only_child_pages_promotes_root_children() {
        let pages = [page(2, 1), page(3, 1), page(4, 2)];
        let forest = PageForest::build(&pages, true, Some(1));
        assert_eq!(outline(&forest), [(2, 0), (4, 1), (3, 0)]);

        // Without the mode, the children of 1 are orphaned: 1 is not listed.
        let forest = PageForest::build(&pages, false, Some(1));
        assert!(forest.is_empty());
    }

    #[test]
    fn test_duplicate_ids_replace_in_place() {
        let mut replacement = page(2, 0);
        replacement.title = "Replaced".into();
        let pages = [page(1, 0), page(2, 0), page(3, 0), replacement];
        let forest = PageForest::build(&pages, false, None);

        let titles: Vec<_> = forest.roots().iter().map(|&i| forest.node(i).page.title.as_str()).collect();
        assert_eq!(titles, ["Page 1", "Replaced", "Page 3"]);
    }

    #[test]
    fn test_cycles_do_not_loop() {
        // 1 is top level; 2 and 3 point at each other below it.
        let pages = [page(1, 0), page(2, 1), page(3, 2), page(2, 3)];
        let forest = PageForest::build(&pages, false, None);
        assert!(forest.len() <= pages.len() * 2);

        // A self-parented page lists once at the top level.
        let self_parent = [page(5, 5), page(6, 5)];
        let forest = PageForest::build(&self_parent, false, None);
        assert_eq!(outline(&forest), [(5, 0), (6, 1)]);

        let forest = PageForest::build(&self_parent, true, Some(5));
        assert_eq!(outline(&forest), [(5, 0), (6, 0)]);
    }

    #[test]
    fn test_active_ancestor_ids() {
        let mut pages = vec![page(1, 0), page(2, 1), page(3, 2), page(4, 0)];
        assert!(active_ancestor_ids(&pages).is_empty());

        pages[2].is_active = true;
        assert_eq!(active_ancestor_ids(&pages), [2, 1]);

        let looped = [page(1, 2), page(2, 1).active()];
        assert_eq!(active_ancestor_ids(&looped), [1]);

        let unlisted_parent = [page(7, 9).active()];
        assert_eq!(active_ancestor_ids(&unlisted_parent), [9]);
    }
}
