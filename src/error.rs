//! Error types.
//!
//! Only the host-side failures collected in [`StartupError`] ever reach the
//! caller of [`crate::startup::bootstrap`]. Config fetch and session refresh
//! failures are logged and recovered where they happen, and a route miss
//! falls back to the default route.

use http::StatusCode;

/// Failure to fetch or decode the runtime `config.json`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFetchError {
    #[error("error sending config request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status code fetching config: {0}")]
    Http(StatusCode),
    #[error("error parsing config JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("config body is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

/// Failure to validate the session against the profile endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SessionRefreshError {
    #[error("error sending profile request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status code from profile endpoint: {0}")]
    Http(StatusCode),
    #[error("error parsing profile JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("profile groups are malformed: {0}")]
    Groups(#[source] serde_json::Error),
}

/// A URL that matches none of the declared routes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route matches '{path}'")]
pub struct RouteMiss {
    pub path: String,
}

/// A route table that cannot be installed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("route '{name}' has pattern '{pattern}' which does not start with '/'")]
    NotAbsolute { name: String, pattern: String },
    #[error("route '{name}' has an unnamed parameter in '{pattern}'")]
    EmptyParam { name: String, pattern: String },
    #[error("route '{name}' declares parameter '{param}' more than once")]
    DuplicateParam { name: String, param: String },
    #[error("route name '{0}' is declared more than once")]
    DuplicateName(String),
    #[error("default url '{0}' does not resolve to a declared route")]
    UnknownDefault(String),
}

/// Failure to load the host settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("error loading settings: {0}")]
    Figment(#[source] Box<figment::Error>),
}

impl From<figment::Error> for SettingsError {
    fn from(e: figment::Error) -> Self {
        SettingsError::Figment(Box::new(e))
    }
}

/// Failure to install the tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid logging.level '{0}'. Valid values: trace, debug, info, warn, error")]
    InvalidLevel(String),
    #[error("error installing tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Host-side problems that stop the application from being bootstrapped.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid app_root '{url}': {source}")]
    AppRoot {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("error building HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error(transparent)]
    Routes(#[from] RouteTableError),
}
