use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::endpoints::AuthEndpoints;
use super::navigator::Navigator;
use super::profile::ProfileSource;
use super::session::{Session, SessionStatus};
use crate::authorization::{submitter_projects, ANONYMOUS_PROJECT};
use crate::error::SessionRefreshError;
use crate::utils::log_throttle::should_emit;

const REFRESH_FAILURE_LOG_WINDOW: Duration = Duration::from_secs(30);

/// What a call to [`SessionStore::refresh`] did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The result was applied; carries the resulting session.
    Applied(Session),
    /// A newer refresh or a sign-out was issued while this one was in flight,
    /// so its result was dropped.
    Superseded,
}

/// Owner of the shared [`Session`].
///
/// Every mutation is a ticketed operation: refreshes and sign-outs draw an
/// increasing ticket when issued, and a result is only written if its ticket is
/// newer than the last one written. A slow response therefore never overwrites
/// the outcome of a call issued after it.
pub struct SessionStore {
    state: watch::Sender<Session>,
    issued: AtomicU64,
    applied: AtomicU64,
    profile: Arc<dyn ProfileSource>,
    navigator: Arc<dyn Navigator>,
    endpoints: AuthEndpoints,
    authentication_enabled: bool,
}

impl SessionStore {
    pub fn new(
        profile: Arc<dyn ProfileSource>,
        navigator: Arc<dyn Navigator>,
        endpoints: AuthEndpoints,
        authentication_enabled: bool,
    ) -> Self {
        let (state, _) = watch::channel(Session::default());
        SessionStore {
            state,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
            profile,
            navigator,
            endpoints,
            authentication_enabled,
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    /// Change notifications for views that render from the session.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn endpoints(&self) -> &AuthEndpoints {
        &self.endpoints
    }

    pub fn authentication_enabled(&self) -> bool {
        self.authentication_enabled
    }

    /// Leaves the application for the server's sign-in page.
    pub fn sign_in(&self) {
        info!(
            event_name = "session.sign_in",
            event_domain = "session",
            "redirecting to sign-in"
        );
        self.navigator.navigate(&self.endpoints.sign_in);
    }

    /// Clears the session, then leaves the application for the server's
    /// sign-out page. Refreshes still in flight are superseded.
    pub fn sign_out(&self) {
        let ticket = self.next_ticket();
        self.state.send_modify(|session| {
            self.applied.store(ticket, Ordering::SeqCst);
            session.clear();
        });
        info!(
            event_name = "session.sign_out",
            event_domain = "session",
            ticket,
            "session cleared, redirecting to sign-out"
        );
        self.navigator.navigate(&self.endpoints.sign_out);
    }

    /// Re-validates the session against the profile endpoint.
    ///
    /// Success authenticates the returned user; any failure resets the session
    /// to the signed-out shape. Neither is retried.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.next_ticket();
        self.state.send_if_modified(Session::begin_check);
        debug!(
            event_name = "session.refresh.issued",
            event_domain = "session",
            ticket,
            "checking session"
        );

        let result = self.profile.fetch_profile().await.and_then(|user| {
            // Groups only matter when submitter authorization is in force.
            let projects = if self.authentication_enabled {
                let groups = user.groups().map_err(SessionRefreshError::Groups)?;
                submitter_projects(&groups)
            } else {
                vec![ANONYMOUS_PROJECT.to_string()]
            };
            Ok((user, projects))
        });

        let mut outcome = RefreshOutcome::Superseded;
        self.state.send_if_modified(|session| {
            if ticket <= self.applied.load(Ordering::SeqCst) {
                return false;
            }
            self.applied.store(ticket, Ordering::SeqCst);
            match result {
                Ok((user, projects)) => session.authenticate(user, projects),
                Err(ref e) => {
                    log_refresh_failure(ticket, e);
                    session.clear();
                }
            }
            outcome = RefreshOutcome::Applied(session.clone());
            true
        });

        match &outcome {
            RefreshOutcome::Applied(session) => info!(
                event_name = "session.refresh.applied",
                event_domain = "session",
                ticket,
                authenticated = session.is_authenticated(),
                projects = session.authorized_project_names().len(),
                "session updated"
            ),
            RefreshOutcome::Superseded => debug!(
                event_name = "session.refresh.superseded",
                event_domain = "session",
                ticket,
                "dropping stale session check result"
            ),
        }
        outcome
    }

    fn next_ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn log_refresh_failure(ticket: u64, error: &SessionRefreshError) {
    match error {
        // Not being signed in is the normal case for visitors.
        SessionRefreshError::Http(status) => info!(
            event_name = "session.refresh.unauthenticated",
            event_domain = "session",
            ticket,
            status = status.as_u16(),
            "profile check rejected, continuing signed out"
        ),
        other => {
            if let Some(suppressed_count) =
                should_emit("session.refresh.failed", REFRESH_FAILURE_LOG_WINDOW)
            {
                warn!(
                    event_name = "session.refresh.failed",
                    event_domain = "session",
                    ticket,
                    error = %other,
                    suppressed_count,
                    "profile check failed, continuing signed out"
                );
            }
        }
    }
}
