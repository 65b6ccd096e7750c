//! Role-based route visibility.
//!
//! A route may carry an [`Authority`] restriction. The current principal is
//! described by an [`AuthoritySet`]. A route is visible when the two share
//! at least one role token; an anonymous principal (empty set) only sees
//! unrestricted routes.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Roles allowed to see a route.
///
/// Configuration accepts either a single role (`authority: admin`) or a
/// list (`authority: [admin, user]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Authority(BTreeSet<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthorityRepr {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for Authority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roles = match AuthorityRepr::deserialize(deserializer)? {
            AuthorityRepr::One(role) => vec![role],
            AuthorityRepr::Many(roles) => roles,
        };
        Ok(roles.into_iter().collect())
    }
}

impl Authority {
    /// Whether a principal holding `principal` may see the route.
    ///
    /// An empty restriction admits nobody.
    pub fn permits(&self, principal: &AuthoritySet) -> bool {
        !self.0.is_disjoint(&principal.0)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Authority {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .map(|r: String| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        )
    }
}

/// Role tokens held by the current principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthoritySet(BTreeSet<String>);

impl AuthoritySet {
    /// The anonymous principal.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn is_subset(&self, other: &AuthoritySet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AuthoritySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .map(|r: String| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn permits_on_shared_role() {
        let authority: Authority = ["admin", "user"].into_iter().collect();
        let principal: AuthoritySet = ["user"].into_iter().collect();
        assert!(authority.permits(&principal));
    }

    #[test]
    fn anonymous_is_denied() {
        let authority: Authority = ["admin"].into_iter().collect();
        assert!(!authority.permits(&AuthoritySet::anonymous()));
    }

    #[test]
    fn empty_restriction_admits_nobody() {
        let authority = Authority::default();
        let principal: AuthoritySet = ["admin"].into_iter().collect();
        assert!(!authority.permits(&principal));
    }

    #[test]
    fn deserialize_single_role_or_list() {
        let one: Authority = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(one.roles().collect::<Vec<_>>(), vec!["admin"]);

        let many: Authority = serde_json::from_str(r#"["user", "admin", "user"]"#).unwrap();
        assert_eq!(many.roles().collect::<Vec<_>>(), vec!["admin", "user"]);
    }

    #[test]
    fn blank_roles_are_dropped() {
        let principal: AuthoritySet = ["", "  ", "guest"].into_iter().collect();
        assert_eq!(principal.len(), 1);
        assert!(principal.contains("guest"));
    }
}
