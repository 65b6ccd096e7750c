//! Route configuration loading.
//!
//! A route file holds a single root route, written as YAML, JSON or TOML.
//! Every loader validates the tree; the [`ConfigError`](crate::error::ConfigError)
//! behind a failure stays reachable through `anyhow::Error::downcast_ref`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::tree::{RouteNode, RouteTree};

/// Maximum route file size (10 MB).
const MAX_ROUTE_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported route file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

pub fn from_yaml_str(source: &str) -> Result<RouteTree> {
    let root: RouteNode = serde_yml::from_str(source).context("failed to parse YAML route file")?;
    Ok(RouteTree::new(root)?)
}

pub fn from_json_str(source: &str) -> Result<RouteTree> {
    let root: RouteNode = serde_json::from_str(source).context("failed to parse JSON route file")?;
    Ok(RouteTree::new(root)?)
}

pub fn from_toml_str(source: &str) -> Result<RouteTree> {
    let root: RouteNode = toml::from_str(source).context("failed to parse TOML route file")?;
    Ok(RouteTree::new(root)?)
}

pub fn from_str(source: &str, format: Format) -> Result<RouteTree> {
    match format {
        Format::Yaml => from_yaml_str(source),
        Format::Json => from_json_str(source),
        Format::Toml => from_toml_str(source),
    }
}

/// Load and validate a route file, choosing the format by extension.
pub fn load(path: &Path) -> Result<RouteTree> {
    let Some(format) = Format::from_path(path) else {
        bail!(
            "unsupported route file extension: {} (expected .yml, .yaml, .json or .toml)",
            path.display()
        );
    };

    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to stat route file {}", path.display()))?;
    if metadata.len() > MAX_ROUTE_FILE_SIZE {
        bail!(
            "route file {} is {} bytes, over the {MAX_ROUTE_FILE_SIZE} byte limit",
            path.display(),
            metadata.len()
        );
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    let tree = from_str(&source, format)
        .with_context(|| format!("invalid route file {}", path.display()))?;

    info!(path = %path.display(), routes = tree.entries().len(), "loaded route file");
    Ok(tree)
}
