//! Runtime configuration constants loaded from `config.json`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Key holding the base URL of the TestAPI server.
pub const API_URL_KEY: &str = "testapiApiUrl";

/// Key holding the "authentication enabled" flag.
pub const AUTHENTICATE_KEY: &str = "authenticate";

/// Named constants, one per top-level key of the fetched configuration.
///
/// Built once during bootstrap and never mutated afterwards; components receive
/// it behind an `Arc` and must tolerate any key being absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    constants: BTreeMap<String, Value>,
}

impl AppConfig {
    /// The configuration used when `config.json` cannot be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        AppConfig {
            constants: map.into_iter().collect(),
        }
    }

    /// Raw value of the constant named `key`.
    pub fn constant(&self, key: &str) -> Option<&Value> {
        self.constants.get(key)
    }

    /// Constant named `key` decoded as `T`. A value of the wrong shape reads as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.constant(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.constants.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.constants.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Base URL of the TestAPI server, if configured as a non-empty string.
    pub fn api_url(&self) -> Option<&str> {
        self.constant(API_URL_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether group-based submitter authorization is in force.
    ///
    /// `true`, the string `"true"` (any case) and non-zero numbers enable it;
    /// everything else, including absence, disables it. This is deliberately
    /// stricter than JavaScript truthiness, so `"false"`, `"0"` and non-empty
    /// lists or objects leave it disabled.
    pub fn authentication_enabled(&self) -> bool {
        match self.constant(AUTHENTICATE_KEY) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            _ => false,
        }
    }
}
