//! # Client configuration - `horses.toml`
//!
//! Settings that shape how the UI talks to the backend. Every field has a
//! default, so an empty or missing file is equivalent to
//! [`ClientConfig::default`].
//!
//! ```toml
//! backend_url = "http://localhost:8080"
//!
//! [search]
//! debounce_ms = 600       # delay before a list search is issued
//! suggestion_limit = 5    # autocomplete result count
//!
//! [family_tree]
//! default_generations = 5
//! ```

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without trailing slash.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub family_tree: FamilyTreeConfig,
}

/// Search and autocomplete settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

/// Family tree settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FamilyTreeConfig {
    /// Used when the route carries no usable `generations` value.
    #[serde(default = "default_generations")]
    pub default_generations: u32,
}

fn default_backend_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_debounce_ms() -> u64 {
    600
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_generations() -> u32 {
    crate::family_tree::GenerationLimit::DEFAULT
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            search: SearchConfig::default(),
            family_tree: FamilyTreeConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl Default for FamilyTreeConfig {
    fn default() -> Self {
        Self {
            default_generations: default_generations(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Builder method to set the search debounce delay.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.search.debounce_ms = ms;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "horses.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.backend_url = config.backend_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ClientConfig::from_toml("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = ClientConfig::from_toml(
            r#"
            backend_url = "https://horses.example.org/"

            [search]
            debounce_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.backend_url, "https://horses.example.org");
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.suggestion_limit, 5);
        assert_eq!(config.family_tree.default_generations, 5);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::new("http://backend:9000/").with_debounce_ms(100);
        let parsed = ClientConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.backend_url, "http://backend:9000");
    }
}
