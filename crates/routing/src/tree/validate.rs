//! Construction-time checks for a route tree.

use std::collections::BTreeMap;

use tracing::warn;

use super::path::{join, segments};
use super::{RouteEntry, RouteNode, RouteTree};
use crate::breadcrumb::resolve_breadcrumb;
use crate::error::{ConfigError, ConfigResult, ResolveError};

pub(super) fn validate(tree: &RouteTree) -> ConfigResult<()> {
    if tree.root().catch_all {
        return Err(ConfigError::InvalidCatchAll {
            parent: "/".to_string(),
            reason: "the root route cannot be a catch-all",
        });
    }
    if tree.root().path.trim().is_empty() {
        return Err(ConfigError::MissingPath {
            parent: "<root>".to_string(),
            index: 0,
        });
    }

    check_shape(tree.root(), "/")?;

    let entries = tree.entries();
    check_unique_paths(&entries)?;
    check_redirects(tree, &entries)
}

/// Paths, nesting, catch-all shape and redirect count within each sibling group.
fn check_shape(node: &RouteNode, base: &str) -> ConfigResult<()> {
    let abs = join(base, &node.path);
    let mut seen_catch_all = false;
    let mut seen_redirect = false;

    for (index, child) in node.routes.iter().enumerate() {
        if child.catch_all {
            if seen_catch_all {
                return Err(ConfigError::MultipleCatchAll { parent: abs });
            }
            seen_catch_all = true;

            if child.is_redirect() {
                return Err(ConfigError::InvalidCatchAll {
                    parent: abs,
                    reason: "catch-all routes cannot redirect",
                });
            }
            if !child.routes.is_empty() {
                return Err(ConfigError::InvalidCatchAll {
                    parent: abs,
                    reason: "catch-all routes cannot have children",
                });
            }
        } else if child.path.trim().is_empty() {
            return Err(ConfigError::MissingPath {
                parent: abs,
                index,
            });
        } else {
            let child_abs = join(&abs, &child.path);
            if !is_nested(&abs, &child_abs) {
                return Err(ConfigError::PathOutsideParent {
                    parent: abs,
                    path: child_abs,
                });
            }

            if let Some(target) = child.redirect.as_deref()
                && join(&abs, target) != child_abs
            {
                if seen_redirect {
                    return Err(ConfigError::MultipleRedirects { parent: abs });
                }
                seen_redirect = true;
            }
        }

        check_shape(child, &abs)?;
    }

    Ok(())
}

/// Whether `child` lies at or below `parent`, segment by segment.
fn is_nested(parent: &str, child: &str) -> bool {
    let parent = segments(parent);
    let child = segments(child);
    parent.len() <= child.len()
        && parent
            .iter()
            .zip(&child)
            .all(|(p, c)| p == c || (p.starts_with(':') && c.starts_with(':')))
}

/// Key under which two paths would match the same URLs.
fn match_key(path: &str) -> String {
    let parts: Vec<&str> = segments(path)
        .into_iter()
        .map(|s| if s.starts_with(':') { ":" } else { s })
        .collect();
    format!("/{}", parts.join("/"))
}

fn check_unique_paths(entries: &[RouteEntry<'_>]) -> ConfigResult<()> {
    let mut by_key: BTreeMap<String, Vec<&RouteEntry<'_>>> = BTreeMap::new();
    for entry in entries.iter().filter(|e| !e.node.catch_all) {
        by_key.entry(match_key(&entry.path)).or_default().push(entry);
    }

    // Entries are in pre-order, so only an earlier entry can be an ancestor.
    for group in by_key.values() {
        for (i, later) in group.iter().enumerate() {
            if group[..i].iter().any(|earlier| !earlier.is_ancestor_of(later)) {
                return Err(ConfigError::DuplicatePath {
                    path: later.path.clone(),
                });
            }
        }
    }

    Ok(())
}

fn check_redirects(tree: &RouteTree, entries: &[RouteEntry<'_>]) -> ConfigResult<()> {
    for entry in entries {
        let Some(target) = entry.node.redirect.as_deref() else {
            continue;
        };

        if entry.node.component.is_some() {
            warn!(path = %entry.path, "redirect route has a component; it is ignored");
        }

        let to = join(&entry.parent, target);
        let dangling = || ConfigError::DanglingRedirect {
            from: entry.path.clone(),
            to: to.clone(),
        };

        match resolve_breadcrumb(tree, &to) {
            Ok(breadcrumb) if breadcrumb.leaf().node.catch_all => return Err(dangling()),
            Ok(_) => {}
            Err(ResolveError::NotFound { .. }) => return Err(dangling()),
            Err(ResolveError::RedirectCycle { chain }) => {
                return Err(ConfigError::RedirectCycle { chain });
            }
        }
    }

    Ok(())
}
