//! The bootstrapped application.
//!
//! Holds the handles every view works with: the runtime configuration, the
//! installed route table and the session store.

use std::sync::Arc;

use url::Url;

use crate::config::AppConfig;
use crate::routes::{RouteMatch, RouteTable};
use crate::session::{Session, SessionStore};

/// Application handles shared with every view.
///
/// Only [`crate::startup::bootstrap`] builds one, so holding an `App` means the
/// configuration is loaded and the route table is installed.
#[derive(Clone)]
pub struct App {
    /// Root URL the application was loaded from.
    pub app_root: Url,
    /// Runtime configuration constants, immutable after bootstrap.
    pub config: Arc<AppConfig>,
    /// Installed route table.
    pub routes: Arc<RouteTable>,
    /// Sole writer of the shared session.
    pub session: Arc<SessionStore>,
}

/// What a view gets when it is activated.
#[derive(Clone)]
pub struct View {
    pub route: RouteMatch,
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionStore>,
}

impl View {
    /// Snapshot of the session at the time of the call.
    pub fn session_snapshot(&self) -> Session {
        self.session.session()
    }
}

impl App {
    pub(crate) fn new(
        app_root: Url,
        config: Arc<AppConfig>,
        routes: Arc<RouteTable>,
        session: Arc<SessionStore>,
    ) -> Self {
        App {
            app_root,
            config,
            routes,
            session,
        }
    }

    /// Activates the view for `url`, falling back to the default view.
    pub fn navigate(&self, url: &str) -> View {
        View {
            route: self.routes.resolve(url),
            config: self.config.clone(),
            session: self.session.clone(),
        }
    }
}
