//! Client-side routing between named views.
//!
//! The table is declared once at build time ([`ROUTES`]) and installed during
//! bootstrap. Resolving a URL never has side effects; controllers bound to a
//! view do their own work when the view activates.

mod pattern;
mod table;

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{RouteMiss, RouteTableError};

pub use pattern::{Params, UrlPattern};
pub use table::{ControllerBinding, Route, CONTROLLER_ALIAS, DEFAULT_URL, ROUTES};

/// The outcome of resolving a URL.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub params: Params,
    /// True when the URL matched nothing and the default route was used.
    pub fallback: bool,
}

/// An installed route table with a default route for unmatched URLs.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<(Route, UrlPattern)>,
    default: usize,
}

impl RouteTable {
    /// Compiles and validates `routes`. `default_url` must resolve to one of them.
    pub fn new(routes: Vec<Route>, default_url: &str) -> Result<Self, RouteTableError> {
        let mut names = HashSet::new();
        let mut compiled = Vec::with_capacity(routes.len());
        for route in routes {
            if !names.insert(route.name) {
                return Err(RouteTableError::DuplicateName(route.name.to_string()));
            }
            let pattern = UrlPattern::parse(route.name, route.url)?;
            compiled.push((route, pattern));
        }

        let path = route_path(default_url);
        let default = compiled
            .iter()
            .position(|(_, pattern)| pattern.matches(path).is_some())
            .ok_or_else(|| RouteTableError::UnknownDefault(default_url.to_string()))?;

        Ok(RouteTable {
            routes: compiled,
            default,
        })
    }

    /// The application's own table, falling back to `/`.
    pub fn standard() -> Result<Self, RouteTableError> {
        Self::new(ROUTES.to_vec(), DEFAULT_URL)
    }

    /// Matches `url` against the declared routes in order; the first match wins.
    pub fn match_url(&self, url: &str) -> Result<RouteMatch, RouteMiss> {
        let path = route_path(url);
        self.routes
            .iter()
            .find_map(|(route, pattern)| {
                pattern.matches(path).map(|params| RouteMatch {
                    route: *route,
                    params,
                    fallback: false,
                })
            })
            .ok_or_else(|| RouteMiss {
                path: path.to_string(),
            })
    }

    /// Like [`RouteTable::match_url`], but unmatched URLs resolve to the default route.
    pub fn resolve(&self, url: &str) -> RouteMatch {
        self.match_url(url).unwrap_or_else(|miss| {
            let route = self.default_route();
            debug!(
                event_name = "routes.miss",
                event_domain = "routes",
                path = miss.path.as_str(),
                fallback = route.name,
                "no route matched, using default route"
            );
            RouteMatch {
                route: *route,
                params: Params::new(),
                fallback: true,
            }
        })
    }

    pub fn default_route(&self) -> &Route {
        &self.routes[self.default].0
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .map(|(route, _)| route)
            .find(|route| route.name == name)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|(route, _)| route)
    }

    /// Link to the route called `name` with the given parameters.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        self.routes
            .iter()
            .find(|(route, _)| route.name == name)
            .and_then(|(_, pattern)| pattern.format(params))
    }
}

/// The routable part of a URL: the hash part if there is one (`#/x`, `#!/x`),
/// without any query string.
fn route_path(url: &str) -> &str {
    let url = url.trim();
    let url = match url.split_once('#') {
        Some((_, hash)) => hash.strip_prefix('!').unwrap_or(hash),
        None => url,
    };
    let end = url.find(|c| c == '?' || c == '#').unwrap_or(url.len());
    &url[..end]
}
