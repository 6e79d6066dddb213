//! The application's declared views.

use std::fmt;

use serde::Serialize;

/// A controller bound to a view under a scope alias (`PodsController as ctrl`).
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerBinding {
    pub controller: &'static str,
    pub alias: &'static str,
}

impl fmt::Display for ControllerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as {}", self.controller, self.alias)
    }
}

/// One entry of the route table: URL pattern, template and optional controller.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub url: &'static str,
    pub template_url: &'static str,
    pub controller: Option<ControllerBinding>,
}

impl Route {
    /// A template-only view.
    pub const fn view(name: &'static str, url: &'static str, template_url: &'static str) -> Self {
        Route {
            name,
            url,
            template_url,
            controller: None,
        }
    }

    /// A view whose template binds `controller` as `ctrl`.
    pub const fn controlled(
        name: &'static str,
        url: &'static str,
        template_url: &'static str,
        controller: &'static str,
    ) -> Self {
        Route {
            name,
            url,
            template_url,
            controller: Some(ControllerBinding {
                controller,
                alias: CONTROLLER_ALIAS,
            }),
        }
    }
}

/// Scope alias every controller is bound under.
pub const CONTROLLER_ALIAS: &str = "ctrl";

/// Where unmatched URLs go.
pub const DEFAULT_URL: &str = "/";

pub static ROUTES: [Route; 11] = [
    Route::view("home", "/", "testapi-ui/components/home/home.html"),
    Route::view("about", "/about", "testapi-ui/components/about/about.html"),
    Route::controlled(
        "pods",
        "/pods",
        "testapi-ui/components/pods/pods.html",
        "PodsController",
    ),
    Route::controlled(
        "pod",
        "/pods/:name",
        "testapi-ui/components/pods/pod/pod.html",
        "PodController",
    ),
    Route::controlled(
        "projects",
        "/projects",
        "testapi-ui/components/projects/projects.html",
        "ProjectsController",
    ),
    Route::controlled(
        "project",
        "/projects/:name",
        "testapi-ui/components/projects/project/project.html",
        "ProjectController",
    ),
    Route::controlled(
        "testCase",
        "/projects/:project_name/:name",
        "testapi-ui/components/projects/project/testCases/testCase/testCase.html",
        "TestCaseController",
    ),
    Route::controlled(
        "results",
        "/results",
        "testapi-ui/components/results/results.html",
        "ResultsController",
    ),
    Route::controlled(
        "profile",
        "/profile",
        "testapi-ui/components/profile/profile.html",
        "ProfileController",
    ),
    // Auth failures land on the home template with their own controller.
    Route::controlled(
        "authFailure",
        "/auth_failure",
        "testapi-ui/components/home/home.html",
        "AuthFailureController",
    ),
    Route::controlled(
        "logout",
        "/logout",
        "testapi-ui/components/logout/logout.html",
        "LogoutController",
    ),
];
