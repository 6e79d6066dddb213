use tracing::warn;
use url::Url;

use crate::config::AppConfig;

/// Server endpoints the session talks to, derived from the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEndpoints {
    pub sign_in: Url,
    pub sign_out: Url,
    pub profile: Url,
}

impl AuthEndpoints {
    pub fn new(api_base: &Url) -> Self {
        AuthEndpoints {
            sign_in: endpoint(api_base, "auth/signin"),
            sign_out: endpoint(api_base, "auth/signout"),
            profile: endpoint(api_base, "profile"),
        }
    }

    /// Endpoints under the configured `testapiApiUrl`, or under the origin of
    /// `app_root` when that constant is missing or not a valid URL.
    pub fn from_config(config: &AppConfig, app_root: &Url) -> Self {
        let configured = config.api_url().and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(
                    event_name = "session.api_url.invalid",
                    event_domain = "session",
                    api_url = raw,
                    error = %e,
                    "ignoring invalid API URL"
                );
                None
            }
        });
        let base = configured.unwrap_or_else(|| {
            warn!(
                event_name = "session.api_url.fallback",
                event_domain = "session",
                app_root = app_root.as_str(),
                "no API URL configured, using the application origin"
            );
            let mut origin = app_root.clone();
            origin.set_path("/");
            origin
        });
        Self::new(&base)
    }
}

fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!("{}/{}", base.path().trim_end_matches('/'), path);
    url.set_path(&joined);
    url.set_query(None);
    url.set_fragment(None);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app_root() -> Url {
        Url::parse("http://localhost:8000/testapi-ui/").unwrap()
    }

    fn config(value: serde_json::Value) -> AppConfig {
        AppConfig::from_map(value.as_object().unwrap().clone())
    }

    #[test]
    fn test_endpoints_under_api_base() {
        for base in [
            "http://testapi.example.org/api/v1",
            "http://testapi.example.org/api/v1/",
        ] {
            let endpoints = AuthEndpoints::new(&Url::parse(base).unwrap());
            assert_eq!(
                endpoints.sign_in.as_str(),
                "http://testapi.example.org/api/v1/auth/signin"
            );
            assert_eq!(
                endpoints.sign_out.as_str(),
                "http://testapi.example.org/api/v1/auth/signout"
            );
            assert_eq!(
                endpoints.profile.as_str(),
                "http://testapi.example.org/api/v1/profile"
            );
        }
    }

    #[test]
    fn test_endpoints_from_config() {
        let endpoints = AuthEndpoints::from_config(
            &config(json!({"testapiApiUrl": "http://testapi.example.org/api/v1"})),
            &app_root(),
        );
        assert_eq!(
            endpoints.profile.as_str(),
            "http://testapi.example.org/api/v1/profile"
        );
    }

    #[test]
    fn test_missing_or_invalid_api_url_uses_origin() {
        for cfg in [AppConfig::empty(), config(json!({"testapiApiUrl": "not a url"}))] {
            let endpoints = AuthEndpoints::from_config(&cfg, &app_root());
            assert_eq!(endpoints.sign_in.as_str(), "http://localhost:8000/auth/signin");
            assert_eq!(endpoints.profile.as_str(), "http://localhost:8000/profile");
        }
    }
}
