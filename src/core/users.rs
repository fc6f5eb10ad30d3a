//! In-memory identity cache: user id <-> display name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A user as reported by the transport.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
}

impl UserInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Known users, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct UserCache {
    names: HashMap<String, String>,
}

impl UserCache {
    pub fn new(users: impl IntoIterator<Item = UserInfo>) -> Self {
        let names = users.into_iter().map(|u| (u.id, u.name)).collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display name for a user id.
    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Record a user's current name, returning the previous one.
    pub fn update(&mut self, id: &str, name: &str) -> Option<String> {
        self.names.insert(id.to_string(), name.to_string())
    }

    /// Resolve a case-insensitive name prefix to a user id.
    ///
    /// An exact name wins; otherwise the alphabetically first name starting
    /// with the prefix is chosen so the result does not depend on map order.
    pub fn find_id(&self, prefix: &str) -> Option<&str> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return None;
        }

        if let Some((id, _)) = self
            .names
            .iter()
            .find(|(_, name)| name.to_lowercase() == prefix)
        {
            return Some(id);
        }

        self.names
            .iter()
            .filter(|(_, name)| name.to_lowercase().starts_with(&prefix))
            .min_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()))
            .map(|(id, _)| id.as_str())
    }

    /// Whether the user's name starts with `prefix`, ignoring case.
    pub fn name_matches(&self, id: &str, prefix: &str) -> bool {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return false;
        }
        self.name(id)
            .map(|name| name.to_lowercase().starts_with(&prefix))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> UserCache {
        UserCache::new(vec![
            UserInfo::new("U123", "craig"),
            UserInfo::new("U456", "edward"),
            UserInfo::new("U789", "andrew"),
            UserInfo::new("U999", "Andy"),
        ])
    }

    #[test]
    fn test_lookup_and_update() {
        let mut users = cache();
        assert_eq!(users.len(), 4);
        assert_eq!(users.name("U123"), Some("craig"));
        assert_eq!(users.name("nobody"), None);

        assert_eq!(users.update("U123", "craigo"), Some("craig".to_string()));
        assert_eq!(users.name("U123"), Some("craigo"));
        assert_eq!(users.update("U000", "newbie"), None);
    }

    #[test]
    fn test_find_id_by_prefix() {
        let users = cache();
        assert_eq!(users.find_id("CRA"), Some("U123"));
        assert_eq!(users.find_id("edward"), Some("U456"));
        assert_eq!(users.find_id("zed"), None);
        assert_eq!(users.find_id(""), None);
    }

    #[test]
    fn test_find_id_is_deterministic() {
        let users = cache();
        // "andrew" sorts before "andy"
        assert_eq!(users.find_id("and"), Some("U789"));
        assert_eq!(users.find_id("andy"), Some("U999"));
    }

    #[test]
    fn test_name_matches() {
        let users = cache();
        assert!(users.name_matches("U456", "Ed"));
        assert!(!users.name_matches("U456", "craig"));
        assert!(!users.name_matches("U456", ""));
        assert!(!users.name_matches("unknown", "e"));
    }
}
