use std::process::ExitCode;
use std::sync::Arc;

use serde_json::json;
use testapi_ui::config::{load_settings, print_schema};
use testapi_ui::session::WindowLocation;
use testapi_ui::startup::bootstrap;
use testapi_ui::utils::logger::init_logging;
use tracing::error;

// The application runs on a single thread, like the browser event loop it models.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut url = "/".to_string();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--print-schema" => {
                return match print_schema() {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        eprintln!("Error printing schema: {}", e);
                        ExitCode::FAILURE
                    }
                };
            }
            _ => url = arg,
        }
    }

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let location = Arc::new(WindowLocation::new());
    let app = match bootstrap(&settings, location.clone()).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to bootstrap application: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let view = app.navigate(&url);
    let session = view.session_snapshot();
    let report = json!({
        "view": view.route,
        "session": {
            "status": session.status(),
            "is_authenticated": session.is_authenticated(),
            "current_user": session.current_user(),
            "authorized_project_names": session.authorized_project_names(),
        },
        "location": location.href().map(|u| u.to_string()),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to render report: {}", e);
            ExitCode::FAILURE
        }
    }
}
