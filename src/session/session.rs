use serde::Serialize;

use crate::authorization::ANONYMOUS_PROJECT;
use crate::models::User;

/// Where the session is in its check lifecycle.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Nothing is known yet; the initial check has not been issued.
    #[default]
    Unknown,
    /// The initial check is in flight.
    Checking,
    Authenticated,
    Anonymous,
}

/// Authentication state shared by every view.
///
/// Views only ever see snapshots; [`super::SessionStore`] is the sole writer.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Session {
    status: SessionStatus,
    current_user: Option<User>,
    authorized_project_names: Vec<String>,
}

impl Session {
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Only ever true while a user is present.
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated && self.current_user.is_some()
    }

    pub fn authorized_project_names(&self) -> &[String] {
        &self.authorized_project_names
    }

    /// Whether results may be submitted to `project`, either because it is
    /// listed or because access is unrestricted.
    pub fn may_submit_to(&self, project: &str) -> bool {
        self.authorized_project_names
            .iter()
            .any(|p| p == project || p == ANONYMOUS_PROJECT)
    }

    /// True for the logged-out shape: no user, not authenticated, no projects.
    pub fn is_signed_out(&self) -> bool {
        self.current_user.is_none()
            && !self.is_authenticated()
            && self.authorized_project_names.is_empty()
    }

    pub(crate) fn begin_check(&mut self) -> bool {
        if self.status == SessionStatus::Unknown {
            self.status = SessionStatus::Checking;
            true
        } else {
            false
        }
    }

    pub(crate) fn authenticate(&mut self, user: User, projects: Vec<String>) {
        self.status = SessionStatus::Authenticated;
        self.current_user = Some(user);
        self.authorized_project_names = projects;
    }

    pub(crate) fn clear(&mut self) {
        self.status = SessionStatus::Anonymous;
        self.current_user = None;
        self.authorized_project_names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_session_is_unknown_and_signed_out() {
        let session = Session::default();
        assert_eq!(session.status(), SessionStatus::Unknown);
        assert!(session.is_signed_out());
        assert!(session.authorized_project_names().is_empty());
    }

    #[test]
    fn test_begin_check_only_from_unknown() {
        let mut session = Session::default();
        assert!(session.begin_check());
        assert_eq!(session.status(), SessionStatus::Checking);
        assert!(!session.begin_check());

        session.clear();
        assert!(!session.begin_check());
        assert_eq!(session.status(), SessionStatus::Anonymous);
    }

    #[test]
    fn test_authenticate_then_clear() {
        let mut session = Session::default();
        session.authenticate(User::default(), vec!["functest".to_string()]);
        assert!(session.is_authenticated());
        assert!(session.may_submit_to("functest"));
        assert!(!session.may_submit_to("yardstick"));

        session.clear();
        assert!(session.is_signed_out());
        assert_eq!(session.status(), SessionStatus::Anonymous);
    }

    #[test]
    fn test_anonymous_sentinel_allows_any_project() {
        let mut session = Session::default();
        session.authenticate(User::default(), vec![ANONYMOUS_PROJECT.to_string()]);
        assert!(session.may_submit_to("functest"));
        assert!(session.may_submit_to("anything"));
    }
}
