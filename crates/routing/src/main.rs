//! Hamal route file inspector.
//!
//! Usage:
//!   hamal-routes --routes config/routes.yml menu --role admin
//!   hamal-routes resolve /overview/analysis

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hamal_routing::config::Config;
use hamal_routing::{AuthoritySet, RouteTree, derive_menu, loader, path_index, resolve_breadcrumb};

/// Inspect and validate Hamal dashboard route files.
#[derive(Parser, Debug)]
#[command(name = "hamal-routes", author, version, about, long_about = None)]
struct Args {
    /// Route file (defaults to ROUTES_FILE).
    #[arg(long, global = true)]
    routes: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the route file.
    Check,

    /// Print the menu visible to the given roles as JSON.
    Menu {
        /// Role held by the principal; repeatable. Defaults to DEFAULT_ROLES.
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Print the breadcrumb trail a pathname resolves to.
    Resolve { pathname: String },

    /// Print every renderable path.
    Sitemap,

    /// Print the path-to-route index as JSON.
    Index,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let routes_file = args.routes.unwrap_or_else(|| config.routes_file.clone());

    let tree = loader::load(&routes_file)?;

    match args.command {
        Command::Check => check(&tree),
        Command::Menu { roles } => {
            let principal = if roles.is_empty() {
                config.default_roles.clone()
            } else {
                roles.into_iter().collect()
            };
            menu(&tree, &principal)?;
        }
        Command::Resolve { pathname } => resolve(&tree, &pathname, &config.site_title)?,
        Command::Sitemap => {
            for path in tree.sitemap() {
                println!("{path}");
            }
        }
        Command::Index => index(&tree)?,
    }

    Ok(())
}

fn check(tree: &RouteTree) {
    let entries = tree.entries();
    let redirects = entries.iter().filter(|e| e.node.is_redirect()).count();
    let catch_alls = entries.iter().filter(|e| e.node.catch_all).count();
    println!(
        "ok: {} routes, {} renderable, {redirects} redirects, {catch_alls} catch-all",
        entries.len(),
        tree.sitemap().len(),
    );
}

fn menu(tree: &RouteTree, principal: &AuthoritySet) -> Result<()> {
    let forest = derive_menu(tree, principal);
    info!(roles = principal.len(), entries = forest.len(), "derived menu");
    println!("{}", serde_json::to_string_pretty(&forest)?);
    Ok(())
}

fn resolve(tree: &RouteTree, pathname: &str, site_title: &str) -> Result<()> {
    let breadcrumb = resolve_breadcrumb(tree, pathname)?;

    for from in &breadcrumb.redirects {
        println!("redirect: {from}");
    }
    for crumb in breadcrumb.crumbs() {
        let label = crumb.node.display_name().unwrap_or("-");
        match &crumb.node.authority {
            Some(authority) => {
                let roles: Vec<&str> = authority.roles().collect();
                println!("{:<32} {label} [{}]", crumb.path, roles.join(", "));
            }
            None => println!("{:<32} {label}", crumb.path),
        }
    }
    for (name, value) in &breadcrumb.params {
        println!("param: {name}={value}");
    }
    println!("title: {}", breadcrumb.page_title(site_title));
    Ok(())
}

fn index(tree: &RouteTree) -> Result<()> {
    let index: BTreeMap<String, Vec<String>> = path_index(tree)
        .into_iter()
        .map(|(path, chain)| {
            let labels = chain
                .iter()
                .map(|n| n.display_name().unwrap_or(n.path.as_str()).to_string())
                .collect();
            (path, labels)
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&index)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
