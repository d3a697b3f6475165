//! Client configuration from the environment.

use model::ClientConfig;

/// Environment variable overriding the backend base URL.
pub const BACKEND_URL_VAR: &str = "HORSES_BACKEND_URL";

/// Build the client configuration.
///
/// Native builds start from `horses.toml` in the working directory when one
/// exists, then apply `.env` and the process environment. Wasm builds use the
/// value of [`BACKEND_URL_VAR`] captured at compile time.
pub fn load() -> ClientConfig {
    let config = base_config();
    match backend_url_override() {
        Some(url) => {
            tracing::info!("Using backend at {}", url);
            ClientConfig {
                backend_url: ClientConfig::new(url).backend_url,
                ..config
            }
        }
        None => config,
    }
}

/// Parse a configuration file's contents, falling back to defaults when the
/// file is malformed.
pub fn from_file_contents(contents: &str) -> ClientConfig {
    ClientConfig::from_toml(contents).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed {}: {}", ClientConfig::filename(), e);
        ClientConfig::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn base_config() -> ClientConfig {
    match std::fs::read_to_string(ClientConfig::filename()) {
        Ok(contents) => from_file_contents(&contents),
        Err(_) => ClientConfig::default(),
    }
}

#[cfg(target_arch = "wasm32")]
fn base_config() -> ClientConfig {
    ClientConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn backend_url_override() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(BACKEND_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn backend_url_override() -> Option<String> {
    option_env!("HORSES_BACKEND_URL")
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_overrides_defaults() {
        let config = from_file_contents(
            r#"
backend_url = "http://horses.local:9000"

[search]
debounce_ms = 250
"#,
        );
        assert_eq!(config.backend_url, "http://horses.local:9000");
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.suggestion_limit, 5);
        assert_eq!(config.family_tree.default_generations, 5);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let config = from_file_contents("backend_url = [");
        assert_eq!(config, ClientConfig::default());
    }
}
