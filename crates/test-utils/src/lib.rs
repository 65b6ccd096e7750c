//! Hamal test utilities.
//!
//! Route configuration fixtures: the dashboard's own route file and a
//! builder for small route documents. Builders produce JSON so they can be
//! fed to any loader without depending on the routing crate.

use serde_json::{Map, Value as JsonValue, json};

/// The dashboard route file shipped in `config/routes.yml`.
pub const ADMIN_CONSOLE_ROUTES: &str = include_str!("../../../config/routes.yml");

/// Start a route at `path`.
pub fn route(path: &str) -> TestRoute {
    TestRoute {
        fields: Map::from_iter([("path".to_string(), json!(path))]),
        children: Vec::new(),
    }
}

/// Start a catch-all route.
pub fn catch_all() -> TestRoute {
    TestRoute {
        fields: Map::from_iter([
            ("catchAll".to_string(), json!(true)),
            ("component".to_string(), json!("404")),
        ]),
        children: Vec::new(),
    }
}

/// A route builder for test fixtures.
#[derive(Debug, Clone)]
pub struct TestRoute {
    fields: Map<String, JsonValue>,
    children: Vec<TestRoute>,
}

impl TestRoute {
    /// Set the menu name.
    pub fn named(self, name: &str) -> Self {
        self.set("name", json!(name))
    }

    /// Set the icon.
    pub fn with_icon(self, icon: &str) -> Self {
        self.set("icon", json!(icon))
    }

    /// Set the component reference.
    pub fn with_component(self, component: &str) -> Self {
        self.set("component", json!(component))
    }

    /// Make the route a redirect alias.
    pub fn redirecting_to(self, target: &str) -> Self {
        self.set("redirect", json!(target))
    }

    /// Restrict the route to the given roles.
    pub fn with_authority(self, roles: &[&str]) -> Self {
        self.set("authority", json!(roles))
    }

    /// Hide the route from the menu.
    pub fn hidden(self) -> Self {
        self.set("hideInMenu", json!(true))
    }

    /// Append a child route.
    pub fn child(mut self, child: TestRoute) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child routes.
    pub fn children(mut self, children: impl IntoIterator<Item = TestRoute>) -> Self {
        self.children.extend(children);
        self
    }

    /// Render as a JSON route document.
    pub fn to_json(&self) -> JsonValue {
        let mut fields = self.fields.clone();
        if !self.children.is_empty() {
            let routes = self.children.iter().map(TestRoute::to_json).collect();
            fields.insert("routes".to_string(), JsonValue::Array(routes));
        }
        JsonValue::Object(fields)
    }

    /// Render as a JSON string.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    fn set(mut self, key: &str, value: JsonValue) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }
}

/// The tree from the `/user` redirect example: a layout whose index
/// redirects to its login page.
pub fn user_redirect_tree() -> TestRoute {
    route("/user").children([
        route("/user/login").named("login").with_component("./user/login"),
        route("/user").redirecting_to("/user/login"),
    ])
}

/// A root with one admin-only entry.
pub fn admin_overview_tree() -> TestRoute {
    route("/").child(route("/overview").named("overview").with_authority(&["admin"]))
}
