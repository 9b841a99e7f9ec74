//! Artist records

use serde::{Deserialize, Serialize};

use crate::ids;

/// An artist on the roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artist {
    pub id: String,
    /// Display name
    pub name: String,
    /// Hex color tag used by the front end (e.g. `#FF6B35`)
    pub color: String,
    /// Upper-cased first character of the name
    pub avatar: String,
}

impl Artist {
    /// Create an artist with a fresh id and an avatar derived from the name
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        let name = name.into();
        let avatar = avatar_initial(&name);
        Self {
            id: ids::generate(),
            name,
            color: color.into(),
            avatar,
        }
    }
}

/// First character of `name`, upper-cased; empty for an empty name
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_initial() {
        assert_eq!(avatar_initial("cyril"), "C");
        assert_eq!(avatar_initial("ßon"), "SS");
        assert_eq!(avatar_initial(""), "");
    }

    #[test]
    fn test_new_artist_serializes_camel_case() {
        let artist = Artist::new("Cyril", "#FF6B35");
        let json = serde_json::to_value(&artist).unwrap();
        assert_eq!(json["name"], "Cyril");
        assert_eq!(json["avatar"], "C");
        assert_eq!(json["color"], "#FF6B35");
        assert!(json["id"].is_string());
    }
}
