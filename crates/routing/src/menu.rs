//! Sidebar menu derivation.
//!
//! The menu is derived from the route tree for one principal:
//! - routes whose authority excludes the principal are pruned with their subtree
//! - hidden and catch-all routes are pruned with their subtree
//! - unnamed routes and redirect aliases are dropped, their children promoted

use serde::Serialize;

use crate::authority::AuthoritySet;
use crate::tree::path::join;
use crate::tree::{RouteNode, RouteTree};

/// Prefix of every menu locale key.
const LOCALE_PREFIX: &str = "menu";

/// A menu entry ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Absolute link target.
    pub path: String,
    pub name: String,
    /// i18n key, e.g. `menu.overview.analysis`.
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Number of entries in this item's subtree, itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(MenuItem::count).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Ordered top-level menu entries.
pub type MenuForest = Vec<MenuItem>;

/// Derive the menu visible to `principal`.
pub fn derive_menu(tree: &RouteTree, principal: &AuthoritySet) -> MenuForest {
    let mut forest = Vec::new();
    collect(
        std::slice::from_ref(tree.root()),
        "/",
        LOCALE_PREFIX,
        principal,
        &mut forest,
    );
    forest
}

fn collect(
    nodes: &[RouteNode],
    base: &str,
    locale: &str,
    principal: &AuthoritySet,
    out: &mut Vec<MenuItem>,
) {
    for node in nodes {
        if node.catch_all || node.hide_in_menu {
            continue;
        }
        if let Some(authority) = &node.authority
            && !authority.permits(principal)
        {
            continue;
        }

        let abs = join(base, &node.path);

        match node.display_name() {
            Some(name) if !node.is_redirect() => {
                let locale = format!("{locale}.{name}");
                let mut children = Vec::new();
                collect(&node.routes, &abs, &locale, principal, &mut children);
                out.push(MenuItem {
                    path: abs,
                    name: name.to_string(),
                    locale,
                    icon: node.icon.clone(),
                    children,
                });
            }
            _ => collect(&node.routes, &abs, locale, principal, out),
        }
    }
}

/// Flatten a forest into pre-order paths.
pub fn flatten(forest: &[MenuItem]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut stack: Vec<&MenuItem> = forest.iter().rev().collect();
    while let Some(item) = stack.pop() {
        out.push(item.path.as_str());
        stack.extend(item.children.iter().rev());
    }
    out
}
