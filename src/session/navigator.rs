use std::sync::{Mutex, PoisonError};

use tracing::info;
use url::Url;

/// Full-page navigation, the way a browser leaves the application.
pub trait Navigator: Send + Sync {
    fn navigate(&self, href: &Url);
}

/// Records the location the application asked to navigate to.
///
/// The embedding shell performs the actual page load; once a navigation has
/// been requested the application is expected to be torn down.
#[derive(Debug, Default)]
pub struct WindowLocation {
    href: Mutex<Option<Url>>,
}

impl WindowLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently requested location, if any.
    pub fn href(&self) -> Option<Url> {
        self.href
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for WindowLocation {
    fn navigate(&self, href: &Url) {
        info!(
            event_name = "session.navigate",
            event_domain = "session",
            href = href.as_str(),
            "leaving application"
        );
        *self.href.lock().unwrap_or_else(PoisonError::into_inner) = Some(href.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_last_href() {
        let location = WindowLocation::new();
        assert_eq!(location.href(), None);

        let first = Url::parse("http://api.example.org/auth/signin").unwrap();
        let second = Url::parse("http://api.example.org/auth/signout").unwrap();
        location.navigate(&first);
        location.navigate(&second);
        assert_eq!(location.href(), Some(second));
    }
}
