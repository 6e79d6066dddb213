use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::SessionRefreshError;
use crate::models::User;
use crate::utils::http_helpers::ApiClient;

/// Where the session check gets the current user from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self) -> Result<User, SessionRefreshError>;
}

/// Credentialed GET of `<api-base>/profile`.
pub struct HttpProfileSource {
    client: ApiClient,
    url: Url,
}

impl HttpProfileSource {
    pub fn new(client: ApiClient, url: Url) -> Self {
        HttpProfileSource { client, url }
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch_profile(&self) -> Result<User, SessionRefreshError> {
        debug!("Sending profile request to: {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(SessionRefreshError::Transport)?;

        if !response.status().is_success() {
            return Err(SessionRefreshError::Http(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(SessionRefreshError::Transport)?;
        serde_json::from_str(&body).map_err(SessionRefreshError::Parse)
    }
}
