//! Hamal dashboard routing.
//!
//! The route tree of the dashboard and the views derived from it: the
//! access-filtered sidebar menu and pathname breadcrumbs. Everything here is
//! pure and synchronous over an immutable [`RouteTree`]; hot reload goes
//! through [`RouteStore`], which swaps whole trees.

pub mod authority;
pub mod breadcrumb;
pub mod config;
pub mod error;
pub mod loader;
pub mod menu;
pub mod store;
pub mod tree;

pub use authority::{Authority, AuthoritySet};
pub use breadcrumb::{Breadcrumb, Crumb, path_index, resolve_breadcrumb};
pub use error::{ConfigError, ResolveError};
pub use menu::{MenuForest, MenuItem, derive_menu};
pub use store::RouteStore;
pub use tree::{ComponentRef, RouteEntry, RouteNode, RouteTree};
