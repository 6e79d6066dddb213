use std::time::Duration;

use http::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::config::HttpConfig;

/// Headers attached to every GET so intermediaries and the browser cache never
/// answer with a stale response.
pub fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}

/// The single HTTP client of the application.
///
/// Holds a cookie jar so that requests are credentialed the same way a browser
/// sends its session cookie along with `withCredentials`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()?;
        Ok(ApiClient { client })
    }

    /// Starts a GET request with caching disabled.
    pub fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url).headers(no_cache_headers())
    }
}
