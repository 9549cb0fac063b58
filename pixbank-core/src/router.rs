//! Client router and navigation guard
//!
//! Maps client paths to views. Routes marked `requires_auth` are only
//! reachable while the session store holds a token; otherwise navigation
//! lands on `/login`. Authentication is re-read on every navigation.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::services::session::SessionStore;

/// Path navigation falls back to when the guard refuses
pub const LOGIN_PATH: &str = "/login";

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Login,
    Dashboard,
    Transfer,
    Extract,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Login => "Login",
            View::Dashboard => "Dashboard",
            View::Transfer => "Transfer",
            View::Extract => "Extract",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Redirect(&'static str),
    View(View),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    /// Route name; redirect-only entries have none
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    pub requires_auth: bool,
}

impl Route {
    const fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name: None,
            target: RouteTarget::Redirect(to),
            requires_auth: false,
        }
    }

    const fn public(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name: Some(name),
            target: RouteTarget::View(view),
            requires_auth: false,
        }
    }

    const fn protected(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name: Some(name),
            target: RouteTarget::View(view),
            requires_auth: true,
        }
    }
}

/// The client's route table
pub const ROUTES: &[Route] = &[
    Route::redirect("/", LOGIN_PATH),
    Route::public(LOGIN_PATH, "Login", View::Login),
    Route::protected("/dashboard", "Dashboard", View::Dashboard),
    Route::protected("/transfer", "Transfer", View::Transfer),
    Route::protected("/extract", "Extract", View::Extract),
];

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Final path after redirects
    pub path: String,
    /// Name of the route that was finally matched
    pub name: Option<&'static str>,
    pub view: View,
    /// Originally requested path, when it differs from `path`
    pub redirected_from: Option<String>,
    /// True when the auth guard caused the redirect
    pub guarded: bool,
}

impl RouteMatch {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

pub struct Router {
    routes: &'static [Route],
    session: Arc<SessionStore>,
}

impl Router {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self::with_routes(ROUTES, session)
    }

    pub fn with_routes(routes: &'static [Route], session: Arc<SessionStore>) -> Self {
        Self { routes, session }
    }

    pub fn routes(&self) -> &[Route] {
        self.routes
    }

    /// Look up a route by exact (normalized) path
    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Resolve a navigation to `path`, applying redirects and the auth guard
    pub fn navigate(&self, path: &str) -> Result<RouteMatch> {
        let requested = normalize(path);
        let mut current = requested.clone();
        let mut guarded = false;

        for _ in 0..MAX_REDIRECTS {
            let route = self
                .find(&current)
                .ok_or_else(|| Error::not_found(format!("No route for path '{}'", current)))?;

            match &route.target {
                RouteTarget::Redirect(to) => {
                    current = (*to).to_string();
                }
                RouteTarget::View(view) => {
                    if route.requires_auth && !self.session.is_authenticated()? {
                        current = LOGIN_PATH.to_string();
                        guarded = true;
                        continue;
                    }
                    let redirected_from = (current != requested).then(|| requested.clone());
                    return Ok(RouteMatch {
                        path: current,
                        name: route.name,
                        view: *view,
                        redirected_from,
                        guarded,
                    });
                }
            }
        }

        Err(Error::not_found(format!(
            "Too many redirects while resolving '{}'",
            requested
        )))
    }
}

/// Strip query string, fragment and trailing slash
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let path = path.trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
