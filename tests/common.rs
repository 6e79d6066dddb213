use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use testapi_ui::config::{HttpConfig, LoggingConfig, Settings};
use tokio::net::TcpListener;

/// A canned HTTP answer.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Reply {
            status: StatusCode::OK,
            body: value.to_string(),
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Reply {
            status,
            body: body.to_string(),
        }
    }
}

/// An app root (`/testapi-ui/`) and API (`/api/v1`) served from one local port.
pub struct Fixture {
    pub base: String,
    pub config_requests: Arc<Mutex<Vec<HeaderMap>>>,
    pub profile_requests: Arc<Mutex<Vec<HeaderMap>>>,
}

impl Fixture {
    pub fn app_root(&self) -> String {
        format!("{}/testapi-ui/", self.base)
    }

    pub fn api_url(&self) -> String {
        format!("{}/api/v1", self.base)
    }

    pub fn settings(&self) -> Settings {
        settings_for(&self.app_root())
    }

    pub fn profile_hits(&self) -> usize {
        self.profile_requests.lock().unwrap().len()
    }
}

pub fn settings_for(app_root: &str) -> Settings {
    Settings {
        app_root: app_root.to_string(),
        http: HttpConfig {
            timeout_in_ms: 2000,
        },
        logging: LoggingConfig::default(),
    }
}

/// Starts the fixture. `config` receives the fixture's base URL so the served
/// `config.json` can point back at the fixture's API.
pub async fn spawn_fixture(config: impl FnOnce(&str) -> Reply, profile: Reply) -> Fixture {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fixture listener");
    let base = format!("http://{}", listener.local_addr().unwrap());

    let config_reply = config(&base);
    let config_requests = Arc::new(Mutex::new(Vec::new()));
    let profile_requests = Arc::new(Mutex::new(Vec::new()));

    let config_handler = {
        let requests = config_requests.clone();
        move |headers: HeaderMap| {
            requests.lock().unwrap().push(headers);
            let reply = config_reply.clone();
            async move { (reply.status, reply.body) }
        }
    };
    let profile_handler = {
        let requests = profile_requests.clone();
        move |headers: HeaderMap| {
            requests.lock().unwrap().push(headers);
            let reply = profile.clone();
            async move { (reply.status, reply.body) }
        }
    };

    let app = Router::new()
        .route("/testapi-ui/config.json", get(config_handler))
        .route("/api/v1/profile", get(profile_handler.clone()))
        // Where the profile lives when no API URL is configured.
        .route("/profile", get(profile_handler));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture server failed");
    });

    Fixture {
        base,
        config_requests,
        profile_requests,
    }
}
