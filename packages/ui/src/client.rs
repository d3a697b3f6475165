//! Shared client constructor for every view.
//!
//! All views talk to the backend configured by [`api::config::load`]; the
//! configuration is read once per process.

use std::sync::OnceLock;

use model::ClientConfig;

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// The client configuration, loaded on first use.
pub fn client_config() -> &'static ClientConfig {
    CONFIG.get_or_init(api::config::load)
}

/// Create a client talking to the configured backend over HTTP.
pub fn make_client() -> api::Client<impl api::Backend> {
    let config = client_config().clone();
    api::Client::new(api::HttpBackend::new(&config.backend_url), config)
}
