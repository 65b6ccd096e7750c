//! The static route tree.
//!
//! A [`RouteTree`] is built once from configuration and never mutated.
//! Construction validates the whole tree so that configuration mistakes
//! surface at startup rather than on navigation:
//! - resolved paths are unique (nesting along one ancestry line excepted)
//! - each sibling group has at most one catch-all route
//! - every redirect lands on a real route without cycling

pub mod path;
mod validate;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::authority::Authority;
use crate::error::ConfigResult;

/// Opaque reference to a renderable view. Never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A node of the route configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    /// URL path, absolute (`/user/login`) or relative to the parent (`login`).
    #[serde(default)]
    pub path: String,

    /// Menu label / i18n key. Unnamed routes stay out of the menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,

    /// Target path; the route is an alias that forwards resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// Roles allowed to see this route and its subtree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,

    /// Fallback matched when no sibling matches.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub catch_all: bool,

    /// Keep the route (and its subtree) out of the menu.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide_in_menu: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteNode>,
}

impl RouteNode {
    /// The display name, treating an empty string as absent.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// Whether the route renders a view of its own.
    pub fn is_renderable(&self) -> bool {
        self.component.is_some() && !self.is_redirect() && !self.catch_all
    }
}

/// A route together with its resolved position in the tree.
#[derive(Debug, Clone)]
pub struct RouteEntry<'a> {
    /// Absolute path of the route.
    pub path: String,
    /// Absolute path of the parent route (`/` for the root).
    pub parent: String,
    pub depth: usize,
    pub node: &'a RouteNode,
    index: usize,
    subtree_end: usize,
}

impl RouteEntry<'_> {
    /// Whether `other` lies in this entry's subtree.
    pub fn is_ancestor_of(&self, other: &RouteEntry<'_>) -> bool {
        self.index < other.index && other.index < self.subtree_end
    }
}

/// A validated, immutable route tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTree {
    root: RouteNode,
}

impl RouteTree {
    /// Validate `root` and build the tree.
    pub fn new(root: RouteNode) -> ConfigResult<Self> {
        let tree = Self { root };
        validate::validate(&tree)?;

        debug!(
            routes = tree.entries().len(),
            renderable = tree.sitemap().len(),
            "built route tree"
        );
        Ok(tree)
    }

    /// Wrap `root` without validation.
    #[cfg(test)]
    pub(crate) fn from_unchecked(root: RouteNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    /// Every route in pre-order with its absolute path.
    pub fn entries(&self) -> Vec<RouteEntry<'_>> {
        let mut out = Vec::new();
        collect_entries(&self.root, "/", 0, &mut out);
        out
    }

    /// Absolute paths of routes that render a view, in menu order.
    ///
    /// Parameterized paths are skipped since they have no concrete URL.
    pub fn sitemap(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.entries()
            .into_iter()
            .filter(|e| e.node.is_renderable() && !path::is_parameterized(&e.path))
            .filter_map(|e| seen.insert(e.path.clone()).then_some(e.path))
            .collect()
    }
}

fn collect_entries<'a>(node: &'a RouteNode, base: &str, depth: usize, out: &mut Vec<RouteEntry<'a>>) {
    let abs = path::join(base, &node.path);
    let index = out.len();
    out.push(RouteEntry {
        path: abs.clone(),
        parent: base.to_string(),
        depth,
        node,
        index,
        subtree_end: index + 1,
    });

    for child in &node.routes {
        collect_entries(child, &abs, depth + 1, out);
    }

    let end = out.len();
    out[index].subtree_end = end;
}
