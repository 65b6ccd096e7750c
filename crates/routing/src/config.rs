//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::authority::AuthoritySet;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the route file (default: ./config/routes.yml).
    pub routes_file: PathBuf,

    /// Site title appended to page titles (default: "Hamal Dashboard").
    pub site_title: String,

    /// Roles assumed when none are given (comma-separated, default: anonymous).
    pub default_roles: AuthoritySet,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let routes_file = lookup("ROUTES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./config/routes.yml"));

        let site_title = lookup("SITE_TITLE").unwrap_or_else(|| "Hamal Dashboard".to_string());
        if site_title.trim().is_empty() {
            bail!("SITE_TITLE must not be empty");
        }

        let default_roles: AuthoritySet = lookup("DEFAULT_ROLES")
            .map(|v| v.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        Ok(Self {
            routes_file,
            site_title,
            default_roles,
        })
    }
}
