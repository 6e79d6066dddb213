//! Application bootstrap.
//!
//! Drives the start-up sequence: fetch `config.json`, build the application
//! with those constants and the route table installed, then run the initial
//! session check.

use std::sync::Arc;

use tracing::info;
use url::Url;

use crate::config::{ConfigLoader, Settings};
use crate::error::StartupError;
use crate::routes::RouteTable;
use crate::session::{AuthEndpoints, HttpProfileSource, Navigator, SessionStore};
use crate::state::App;
use crate::utils::http_helpers::ApiClient;

/// Bootstraps the application described by `settings`.
///
/// The configuration fetch completes before anything else is built; a missing
/// or broken `config.json` yields an empty configuration rather than an error.
/// The initial session check runs once, after the route table is installed,
/// and has been applied by the time this returns.
///
/// # Errors
///
/// Returns an error if `app_root` is not a URL, the HTTP client cannot be
/// built, or the route table fails validation.
pub async fn bootstrap(
    settings: &Settings,
    navigator: Arc<dyn Navigator>,
) -> Result<App, StartupError> {
    let app_root = Url::parse(&settings.app_root).map_err(|source| StartupError::AppRoot {
        url: settings.app_root.clone(),
        source,
    })?;
    let client = ApiClient::new(&settings.http).map_err(StartupError::Client)?;

    info!("Loading configuration from {}", app_root);
    let config = Arc::new(ConfigLoader::new(client.clone(), &app_root).load().await);

    let routes = Arc::new(RouteTable::standard()?);
    info!(
        event_name = "startup.routes.installed",
        event_domain = "startup",
        routes = routes.routes().count(),
        default = routes.default_route().url,
        "route table installed"
    );

    let endpoints = AuthEndpoints::from_config(&config, &app_root);
    let profile = HttpProfileSource::new(client, endpoints.profile.clone());
    let session = Arc::new(SessionStore::new(
        Arc::new(profile),
        navigator,
        endpoints,
        config.authentication_enabled(),
    ));

    let app = App::new(app_root, config, routes, session);
    app.session.refresh().await;

    info!(
        event_name = "startup.completed",
        event_domain = "startup",
        authenticated = app.session.session().is_authenticated(),
        "application bootstrapped"
    );
    Ok(app)
}
