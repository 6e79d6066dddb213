use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::error::SettingsError;

/// Settings file read from the working directory.
pub const SETTINGS_FILE: &str = "./testapi-ui.yaml";

/// Prefix of environment variables that override settings file entries.
pub const ENV_PREFIX: &str = "TESTAPI_UI_";

/// A top-level enum for versioned settings.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    SettingsV1(Settings),
}

/// Host settings for v1.0.0: where the application lives and how it logs.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct Settings {
    /// URL of the application root; `config.json` is fetched relative to it.
    pub app_root: String,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Outgoing HTTP behaviour shared by the config fetch and the session check.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_timeout_in_ms() -> u64 {
    5000
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

impl Settings {
    /// Extract settings from an already assembled figment.
    pub fn from_figment(figment: Figment) -> Result<Settings, SettingsError> {
        match figment.extract::<Config>()? {
            Config::SettingsV1(s) => Ok(s),
        }
    }
}

/// Load settings from [`SETTINGS_FILE`], overridden by `TESTAPI_UI_*` variables
/// (nested keys use `__`, e.g. `TESTAPI_UI_LOGGING__LEVEL`).
pub fn load_settings() -> Result<Settings, SettingsError> {
    let figment = Figment::new()
        .merge(Yaml::file(SETTINGS_FILE))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    Settings::from_figment(figment)
}

/// Print the JSON schema for the settings file to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
