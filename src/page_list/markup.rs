//! Page forest → `<li>` element trees.

use rustc_hash::FxHashSet;

use crate::attr::ClassList;
use crate::node::{Element, Node};
use crate::sanitize::Sanitizer;

use super::forest::{PageForest, PageNode};
use super::style::ColorStyle;

/// Caret shown next to items that open a submenu.
pub const SUBMENU_ICON_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="12" height="12" viewBox="0 0 12 12" fill="none" role="img" aria-hidden="true" focusable="false">"#,
    r#"<path d="M1.50002 4L6.00002 8L10.5 4" stroke-width="1.5"></path></svg>"#
);

pub const ITEM_CLASS: &str = "wp-block-pages-list__item";
pub const LINK_CLASS: &str = "wp-block-pages-list__item__link";
pub const SUBMENU_CLASS: &str = "submenu-container";

/// How submenus behave when the list sits inside a navigation block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmenuMode {
    pub is_navigation_child: bool,
    pub open_on_click: bool,
    pub show_icons: bool,
}

impl SubmenuMode {
    fn click_toggle(self) -> bool {
        self.is_navigation_child && self.open_on_click
    }

    fn hover_icon(self) -> bool {
        self.is_navigation_child && self.show_icons && !self.open_on_click
    }
}

/// Builds list items for one render.
pub(crate) struct ItemBuilder<'a, S: ?Sized> {
    pub forest: &'a PageForest<'a>,
    pub colors: &'a ColorStyle,
    pub ancestors: &'a FxHashSet<i64>,
    pub mode: SubmenuMode,
    pub sanitizer: &'a S,
}

impl<S: Sanitizer + ?Sized> ItemBuilder<'_, S> {
    /// Items for the top level of the forest
    pub fn build(&self) -> Vec<Node> {
        self.items(self.forest.roots(), 0)
    }

    fn items(&self, level: &[usize], depth: usize) -> Vec<Node> {
        level
            .iter()
            .map(|&index| self.item(self.forest.node(index), depth).into())
            .collect()
    }

    fn item(&self, node: &PageNode<'_>, depth: usize) -> Element {
        let page = node.page;
        let mode = self.mode;

        let mut classes = ClassList::new().with(ITEM_CLASS);
        if page.is_active {
            classes.push("current-menu-item");
        }
        if self.ancestors.contains(&page.id) {
            classes.push("current-menu-ancestor");
        }
        if node.has_children() {
            classes.push("has-child");
        }
        if mode.is_navigation_child {
            classes.push("wp-block-navigation-item");
            if mode.open_on_click {
                classes.push("open-on-click");
            } else if mode.show_icons {
                classes.push("open-on-hover-click");
            }
        }

        let mut style = "";
        if depth == 1 {
            classes.extend_from(&self.colors.overlay_css_classes);
            style = self.colors.overlay_inline_styles.as_str();
        }

        let mut li = Element::new("li").with_classes(&classes).with_style(style);
        let title = self.sanitizer.sanitize_html(&page.title).into_owned();

        if node.has_children() && mode.click_toggle() {
            li.push(
                Element::new("button")
                    .with_attr(
                        "class",
                        "wp-block-navigation-item__content wp-block-navigation-submenu__toggle",
                    )
                    .with_attr("aria-expanded", "false")
                    .with_raw(title)
                    .with_child(submenu_icon()),
            );
        } else {
            let mut link_classes = ClassList::new().with(LINK_CLASS);
            if mode.is_navigation_child {
                link_classes.push("wp-block-navigation-item__content");
            }
            li.push(
                Element::new("a")
                    .with_classes(&link_classes)
                    .with_attr("href", self.sanitizer.clean_url(&page.link))
                    .with_raw(title),
            );
        }

        if node.has_children() {
            if mode.hover_icon() {
                li.push(
                    Element::new("button")
                        .with_attr(
                            "class",
                            "wp-block-navigation__submenu-icon wp-block-navigation-submenu__toggle",
                        )
                        .with_attr("aria-expanded", "false")
                        .with_child(submenu_icon()),
                );
            }

            let mut submenu_classes = ClassList::new().with(SUBMENU_CLASS);
            if mode.is_navigation_child {
                submenu_classes.push("wp-block-navigation__submenu-container");
            }
            let mut submenu = Element::new("ul").with_classes(&submenu_classes);
            submenu.children.extend(self.items(&node.children, depth + 1));
            li.push(submenu);
        }

        li
    }
}

fn submenu_icon() -> Element {
    Element::new("span")
        .with_attr(
            "class",
            "wp-block-page-list__submenu-icon wp-block-navigation__submenu-icon",
        )
        .with_raw(SUBMENU_ICON_SVG)
}
