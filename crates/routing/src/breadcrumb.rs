//! Pathname resolution for breadcrumbs and page titles.
//!
//! Resolution walks the tree once per pathname. At each route the route's
//! absolute path must be a segment prefix of the pathname; children are
//! tried in configuration order and the first match wins. A route whose
//! path equals the pathname ends the walk, and when nothing below matches
//! the sibling group's catch-all route is used. Redirect routes are never
//! terminal: resolution restarts at the redirect target.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ResolveError;
use crate::tree::path::{Params, join, match_prefix, normalize, segments};
use crate::tree::{RouteNode, RouteTree};

/// One step of a breadcrumb chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb<'a> {
    /// Absolute path this crumb stands for.
    pub path: String,
    pub node: &'a RouteNode,
}

/// Ancestor chain from the root to the route a pathname resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb<'a> {
    crumbs: Vec<Crumb<'a>>,
    /// Values captured from `:param` segments.
    pub params: Params,
    /// Paths of the redirect routes followed, in order.
    pub redirects: Vec<String>,
}

impl<'a> Breadcrumb<'a> {
    /// Every crumb from the root down, layout wrappers included.
    pub fn crumbs(&self) -> &[Crumb<'a>] {
        &self.crumbs
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'a RouteNode> + '_ {
        self.crumbs.iter().map(|c| c.node)
    }

    /// The route the pathname resolved to.
    pub fn leaf(&self) -> &Crumb<'a> {
        // A chain always holds at least the root.
        &self.crumbs[self.crumbs.len() - 1]
    }

    /// Whether the pathname fell through to a catch-all route.
    pub fn is_catch_all(&self) -> bool {
        self.leaf().node.catch_all
    }

    /// Crumbs worth showing in a breadcrumb trail (named routes only).
    pub fn trail(&self) -> Vec<&Crumb<'a>> {
        self.crumbs
            .iter()
            .filter(|c| c.node.display_name().is_some())
            .collect()
    }

    /// Page title: `"<leaf name> - <site title>"`, or the site title alone.
    pub fn page_title(&self, site_title: &str) -> String {
        match self.trail().last().and_then(|c| c.node.display_name()) {
            Some(name) => format!("{name} - {site_title}"),
            None => site_title.to_string(),
        }
    }
}

/// Resolve `pathname` to its breadcrumb chain, following redirects.
pub fn resolve_breadcrumb<'a>(tree: &'a RouteTree, pathname: &str) -> Result<Breadcrumb<'a>, ResolveError> {
    let mut current = normalize(pathname);
    let mut redirects: Vec<String> = Vec::new();

    loop {
        let target = segments(&current);
        let Some((crumbs, params)) = match_route(tree.root(), "/", &target, &current) else {
            debug!(pathname = %current, "no route matched");
            return Err(ResolveError::NotFound { pathname: current });
        };

        let Some(leaf) = crumbs.last().map(|c| c.node) else {
            return Err(ResolveError::NotFound { pathname: current });
        };

        let Some(redirect) = leaf.redirect.as_deref() else {
            return Ok(Breadcrumb {
                crumbs,
                params,
                redirects,
            });
        };

        let depth = crumbs.len();
        let from = crumbs[depth - 1].path.clone();
        let revisit = redirects.contains(&from);
        redirects.push(from);
        if revisit {
            return Err(ResolveError::RedirectCycle { chain: redirects });
        }

        // The parent crumb is the base for relative targets.
        let base = depth.checked_sub(2).map_or("/", |i| crumbs[i].path.as_str());
        current = join(base, redirect);
    }
}

/// Match one route and its subtree against `target`.
fn match_route<'a>(
    node: &'a RouteNode,
    base: &str,
    target: &[&str],
    pathname: &str,
) -> Option<(Vec<Crumb<'a>>, Params)> {
    let abs = join(base, &node.path);
    let pattern = segments(&abs);
    let params = match_prefix(&pattern, target)?;

    for child in node.routes.iter().filter(|c| !c.catch_all) {
        if let Some((mut crumbs, child_params)) = match_route(child, &abs, target, pathname) {
            crumbs.insert(0, Crumb { path: abs, node });
            return Some((crumbs, child_params));
        }
    }

    if pattern.len() == target.len() {
        return Some((vec![Crumb { path: abs, node }], params));
    }

    let fallback = node.routes.iter().find(|c| c.catch_all)?;
    Some((
        vec![
            Crumb { path: abs, node },
            Crumb {
                path: pathname.to_string(),
                node: fallback,
            },
        ],
        params,
    ))
}

/// Map every resolvable absolute path to the chain of routes it resolves to.
///
/// Redirect aliases map to the chain of their final target, and paths
/// shared along one ancestry line map to the route resolution reaches, so
/// every entry agrees with [`resolve_breadcrumb`].
pub fn path_index(tree: &RouteTree) -> BTreeMap<String, Vec<&RouteNode>> {
    let mut index = BTreeMap::new();
    for entry in tree.entries().into_iter().filter(|e| !e.node.catch_all) {
        if index.contains_key(&entry.path) {
            continue;
        }
        match resolve_breadcrumb(tree, &entry.path) {
            Ok(breadcrumb) => {
                index.insert(entry.path, breadcrumb.nodes().collect());
            }
            Err(err) => debug!(path = %entry.path, %err, "route left out of the path index"),
        }
    }
    index
}
