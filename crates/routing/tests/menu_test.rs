#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Menu derivation tests.

use hamal_routing::menu::flatten;
use hamal_routing::{AuthoritySet, MenuItem, RouteTree, derive_menu, loader};
use hamal_test_utils::{ADMIN_CONSOLE_ROUTES, admin_overview_tree, route};

fn admin_console() -> RouteTree {
    loader::from_yaml_str(ADMIN_CONSOLE_ROUTES).unwrap()
}

fn roles(roles: &[&str]) -> AuthoritySet {
    roles.iter().copied().collect()
}

fn is_subsequence(short: &[&str], long: &[&str]) -> bool {
    let mut long = long.iter();
    short.iter().all(|s| long.any(|l| l == s))
}

fn leaves(forest: &[MenuItem]) -> Vec<&MenuItem> {
    let mut out = Vec::new();
    for item in forest {
        if item.is_leaf() {
            out.push(item);
        } else {
            out.extend(leaves(&item.children));
        }
    }
    out
}

#[test]
fn test_admin_only_entry() {
    let tree = loader::from_json_str(&admin_overview_tree().to_json_string()).unwrap();

    assert!(derive_menu(&tree, &roles(&["user"])).is_empty());

    let menu = derive_menu(&tree, &roles(&["admin"]));
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].name, "overview");
}

#[test]
fn test_anonymous_sees_nothing_in_console() {
    let tree = admin_console();
    assert!(derive_menu(&tree, &AuthoritySet::anonymous()).is_empty());
}

#[test]
fn test_console_menu_for_user() {
    let tree = admin_console();
    let menu = derive_menu(&tree, &roles(&["user"]));

    let top: Vec<_> = menu.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        top,
        vec!["overview", "service", "compute", "profile", "result", "exception", "account"]
    );

    let paths = flatten(&menu);
    assert!(paths.contains(&"/service/my-services"));
    assert!(paths.contains(&"/compute/search/articles"));
    assert!(!paths.contains(&"/profile/advanced"));
    assert!(!paths.iter().any(|p| p.starts_with("/editor")));
    assert!(!paths.iter().any(|p| p.starts_with("/user")));
    assert!(!paths.iter().any(|p| p.contains(":id")));
}

#[test]
fn test_console_menu_for_admin() {
    let tree = admin_console();
    let menu = derive_menu(&tree, &roles(&["admin"]));
    let paths = flatten(&menu);
    assert!(paths.contains(&"/profile/advanced"));
    assert!(paths.contains(&"/editor/koni"));

    let compute = menu.iter().find(|m| m.name == "compute").unwrap();
    assert_eq!(compute.icon.as_deref(), Some("table"));
    assert_eq!(compute.children[0].locale, "menu.compute.search-list");
    assert_eq!(
        compute.children[0].children[0].locale,
        "menu.compute.search-list.articles"
    );
}

#[test]
fn test_visibility_is_monotonic() {
    let tree = admin_console();
    let sets = [
        roles(&[]),
        roles(&["guest"]),
        roles(&["user"]),
        roles(&["user", "guest"]),
        roles(&["admin"]),
        roles(&["admin", "user"]),
    ];

    for small in &sets {
        for large in &sets {
            if !small.is_subset(large) {
                continue;
            }
            let small_menu = derive_menu(&tree, small);
            let large_menu = derive_menu(&tree, large);
            assert!(
                is_subsequence(&flatten(&small_menu), &flatten(&large_menu)),
                "{small:?} menu is not a subsequence of {large:?} menu"
            );
        }
    }
}

#[test]
fn test_derivation_is_idempotent() {
    let tree = admin_console();
    let principal = roles(&["admin", "user"]);
    assert_eq!(derive_menu(&tree, &principal), derive_menu(&tree, &principal));
}

#[test]
fn test_redirects_never_become_leaves() {
    let tree = admin_console();
    let redirect_paths: Vec<String> = tree
        .entries()
        .into_iter()
        .filter(|e| e.node.is_redirect())
        .map(|e| e.path)
        .collect();
    assert!(!redirect_paths.is_empty());

    let menu = derive_menu(&tree, &roles(&["admin", "user"]));
    for leaf in leaves(&menu) {
        assert!(
            !redirect_paths.contains(&leaf.path),
            "redirect {} rendered as a menu leaf",
            leaf.path
        );
    }
}

#[test]
fn test_named_redirect_is_not_rendered() {
    let doc = route("/")
        .children([
            route("/home").named("home").redirecting_to("/landing"),
            route("/landing").named("landing").with_component("./landing"),
        ])
        .to_json_string();
    let tree = loader::from_json_str(&doc).unwrap();

    let menu = derive_menu(&tree, &AuthoritySet::anonymous());
    assert_eq!(flatten(&menu), vec!["/landing"]);
}

#[test]
fn test_pruned_root_hides_permissive_descendant() {
    let doc = route("/")
        .child(
            route("/ops")
                .named("ops")
                .with_authority(&["admin"])
                .child(route("/ops/status").named("status")),
        )
        .to_json_string();
    let tree = loader::from_json_str(&doc).unwrap();

    assert!(derive_menu(&tree, &roles(&["user"])).is_empty());
    assert_eq!(derive_menu(&tree, &roles(&["admin"]))[0].count(), 2);
}

#[test]
fn test_hidden_subtree_still_resolves_and_icons_carry_over() {
    let doc = route("/")
        .children([
            route("/overview")
                .named("overview")
                .with_icon("dashboard")
                .child(route("/overview/analysis").named("analysis").with_component("./overview/analysis")),
            route("/account")
                .named("account")
                .with_icon("user")
                .hidden()
                .child(route("/account/center").named("center").with_component("./account/center")),
        ])
        .to_json_string();
    let tree = loader::from_json_str(&doc).unwrap();

    let menu = derive_menu(&tree, &AuthoritySet::anonymous());
    assert_eq!(flatten(&menu), vec!["/overview", "/overview/analysis"]);
    assert_eq!(menu[0].icon.as_deref(), Some("dashboard"));
    assert_eq!(menu[0].children[0].icon, None);

    let breadcrumb = hamal_routing::resolve_breadcrumb(&tree, "/account/center").unwrap();
    assert_eq!(breadcrumb.leaf().node.display_name(), Some("center"));
}
