//! Routing error types.

use thiserror::Error;

/// Errors raised while constructing a [`RouteTree`](crate::tree::RouteTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("route #{index} under {parent} has no path")]
    MissingPath { parent: String, index: usize },

    #[error("route {path} is not nested under its parent {parent}")]
    PathOutsideParent { parent: String, path: String },

    #[error("duplicate route path {path}")]
    DuplicatePath { path: String },

    #[error("more than one catch-all route under {parent}")]
    MultipleCatchAll { parent: String },

    #[error("invalid catch-all route under {parent}: {reason}")]
    InvalidCatchAll { parent: String, reason: &'static str },

    #[error("more than one redirect route under {parent}")]
    MultipleRedirects { parent: String },

    #[error("redirect from {from} to {to} resolves to no route")]
    DanglingRedirect { from: String, to: String },

    #[error("redirect cycle: {}", chain.join(" -> "))]
    RedirectCycle { chain: Vec<String> },
}

/// Errors raised while resolving a pathname against a route tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no route matches {pathname}")]
    NotFound { pathname: String },

    #[error("redirect cycle: {}", chain.join(" -> "))]
    RedirectCycle { chain: Vec<String> },
}

/// Result type alias for route tree construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
