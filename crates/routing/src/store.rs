//! Shared, hot-swappable route tree.
//!
//! Readers take an `Arc` snapshot and keep using it for the whole request.
//! Reloads build and validate a complete new tree first, then swap the
//! shared reference in one step.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::loader;
use crate::tree::RouteTree;

/// Holder of the current route tree.
#[derive(Clone)]
pub struct RouteStore {
    inner: Arc<RwLock<Arc<RouteTree>>>,
}

impl RouteStore {
    pub fn new(tree: RouteTree) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(tree))),
        }
    }

    /// Load the initial tree from a route file.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(loader::load(path)?))
    }

    /// The current tree.
    pub fn snapshot(&self) -> Arc<RouteTree> {
        Arc::clone(&self.inner.read())
    }

    /// Swap in a new tree, returning the previous one.
    pub fn replace(&self, tree: RouteTree) -> Arc<RouteTree> {
        let routes = tree.entries().len();
        let previous = std::mem::replace(&mut *self.inner.write(), Arc::new(tree));
        info!(routes, "route tree replaced");
        previous
    }

    /// Reload from a route file. On failure the current tree stays in place.
    pub fn reload(&self, path: &Path) -> Result<()> {
        match loader::load(path) {
            Ok(tree) => {
                self.replace(tree);
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "route reload failed; keeping current tree");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for RouteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteStore")
            .field("routes", &self.snapshot().entries().len())
            .finish()
    }
}
