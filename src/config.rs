// ⚙️ Configuration
//
// Optional JSON file; every key falls back to the built-in default.
// The path comes from --config or $BILL_SPLITTER_CONFIG (see main.rs).

use crate::add_friend::DEFAULT_PLACEHOLDER_IMAGE;
use crate::entities::{Friend, FriendId};
use crate::error::SplitterError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_LOG_FILTER: &str = "bill_splitter=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base avatar URL pre-filled in the add-friend form
    pub placeholder_image: String,

    /// tracing EnvFilter directive
    pub log_filter: String,

    /// Friends present at startup
    pub friends: Vec<Friend>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            friends: default_friends(),
        }
    }
}

/// The three friends every fresh session starts with
pub fn default_friends() -> Vec<Friend> {
    [("118836", "Clark", -7.0), ("933372", "Sarah", 20.0), ("499476", "Anthony", 0.0)]
        .into_iter()
        .map(|(id, name, balance)| {
            Friend::new(
                FriendId::new(id),
                name,
                format!("{}?u={}", DEFAULT_PLACEHOLDER_IMAGE, id),
                balance,
            )
        })
        .collect()
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to load config {}", path.display()))
    }

    /// No path means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), SplitterError> {
        let mut seen = HashSet::new();
        for friend in &self.friends {
            if !seen.insert(&friend.id) {
                return Err(SplitterError::DuplicateFriendId(friend.id.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_seeds() {
        let config = Config::default();
        let names: Vec<&str> = config.friends.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["Clark", "Sarah", "Anthony"]);
        assert_eq!(config.friends[0].balance, -7.0);
        assert_eq!(config.friends[1].balance, 20.0);
        assert_eq!(config.friends[2].balance, 0.0);
        assert_eq!(config.friends[0].image, "https://i.pravatar.cc/48?u=118836");
        assert_eq!(config.placeholder_image, "https://i.pravatar.cc/48");
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = Config::from_json(r#"{ "log_filter": "debug" }"#).unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.friends.len(), 3);
        assert_eq!(config.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_custom_friends() {
        let config = Config::from_json(
            r#"{ "friends": [ { "id": "7", "name": "Ann", "image": "https://a" } ] }"#,
        )
        .unwrap();

        assert_eq!(config.friends.len(), 1);
        assert_eq!(config.friends[0].id, FriendId::new("7"));
        assert_eq!(config.friends[0].balance, 0.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Config::from_json(
            r#"{ "friends": [
                { "id": "1", "name": "A", "image": "x" },
                { "id": "1", "name": "B", "image": "y" }
            ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "placeholder_image": "https://example.com/avatar" }}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.placeholder_image, "https://example.com/avatar");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }
}
