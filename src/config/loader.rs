//! One-shot fetch of `config.json` ahead of application construction.

use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::app_config::AppConfig;
use crate::error::ConfigFetchError;
use crate::utils::http_helpers::ApiClient;
use crate::utils::value::value_to_string;

/// Name of the configuration resource, relative to the application root.
pub const CONFIG_RESOURCE: &str = "config.json";

/// Fetches the runtime configuration from `<app_root>/config.json`.
pub struct ConfigLoader {
    client: ApiClient,
    url: Url,
}

impl ConfigLoader {
    pub fn new(client: ApiClient, app_root: &Url) -> Self {
        ConfigLoader {
            client,
            url: config_url(app_root),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches and decodes the configuration, reporting why it failed.
    pub async fn fetch(&self) -> Result<AppConfig, ConfigFetchError> {
        debug!("Sending config request to: {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(ConfigFetchError::Transport)?;

        if !response.status().is_success() {
            return Err(ConfigFetchError::Http(response.status()));
        }

        let body = response.text().await.map_err(ConfigFetchError::Transport)?;
        match serde_json::from_str::<Value>(&body).map_err(ConfigFetchError::Parse)? {
            Value::Object(map) => Ok(AppConfig::from_map(map)),
            other => Err(ConfigFetchError::NotAnObject(json_kind(&other))),
        }
    }

    /// Fetches the configuration, substituting an empty one on any failure.
    pub async fn load(&self) -> AppConfig {
        match self.fetch().await {
            Ok(config) => {
                info!(
                    event_name = "config.load.succeeded",
                    event_domain = "config",
                    url = self.url.as_str(),
                    constants = config.len(),
                    "runtime configuration loaded"
                );
                for (key, value) in config.iter() {
                    debug!(
                        event_name = "config.constant",
                        event_domain = "config",
                        key,
                        value = value_to_string(value).as_str(),
                        "registered config constant"
                    );
                }
                config
            }
            Err(e) => {
                warn!(
                    event_name = "config.load.failed",
                    event_domain = "config",
                    url = self.url.as_str(),
                    error = %e,
                    "runtime configuration unavailable, starting with empty configuration"
                );
                AppConfig::empty()
            }
        }
    }
}

/// `app_root` is treated as a directory even without a trailing slash.
pub fn config_url(app_root: &Url) -> Url {
    let mut root = app_root.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    root.set_query(None);
    root.set_fragment(None);
    // Joining a plain file name onto a directory URL cannot fail.
    root.join(CONFIG_RESOURCE).unwrap_or(root)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
