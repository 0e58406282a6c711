//! Navigable views and the guards in front of them.

use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError};

use crate::domain::types::Role;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Admin,
    Staff,
    Settings,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Login,
        Route::Admin,
        Route::Staff,
        Route::Settings,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Admin => "/admin",
            Route::Staff => "/staff",
            Route::Settings => "/settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    /// Views reachable without signing in.
    pub const fn is_public(self) -> bool {
        matches!(self, Route::Home | Route::Login)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Current view plus the ability to move elsewhere.
pub trait Navigator: Send + Sync {
    fn current(&self) -> Route;
    fn navigate(&self, route: Route);
}

/// In-process navigation history.
#[derive(Debug)]
pub struct History {
    visited: Mutex<Vec<Route>>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            visited: Mutex::new(vec![start]),
        }
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Navigator for History {
    fn current(&self) -> Route {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
            .unwrap_or(Route::Home)
    }

    fn navigate(&self, route: Route) {
        log::debug!("Navigating to {route}");
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

/// Checks whether the session may open `route` at unix time `now`.
///
/// Returns the redirect target when it may not.
pub fn guard(session: &Session, route: Route, now: i64) -> Result<(), Route> {
    let allowed = match route {
        Route::Home | Route::Login => true,
        Route::Admin => session.is_authenticated(now) && session.is_admin(),
        Route::Staff => session.is_authenticated(now) && session.is_staff(),
        Route::Settings => session.is_authenticated(now),
    };

    if allowed { Ok(()) } else { Err(Route::Login) }
}

/// Dashboard a freshly signed-in account lands on.
pub fn landing_for(role: &str) -> Route {
    if Role::Admin.matches(role) {
        Route::Admin
    } else if Role::Staff.matches(role) {
        Route::Staff
    } else {
        Route::Home
    }
}
