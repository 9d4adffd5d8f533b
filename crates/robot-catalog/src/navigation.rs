//! Navigation port.
//!
//! Navigation is fire-and-forget: the submission handler signals where the
//! user should go next and never inspects the outcome.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::info;

/// Views the catalogue can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The create-robot form.
    Create,
    /// The browse view listing visible robots.
    Browse,
}

impl Route {
    /// Path segment for the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Create => "/create",
            Self::Browse => "/browse",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Port for switching views.
pub trait Navigator: Send + Sync {
    /// Requests a switch to `route`.
    fn go_to(&self, route: Route);
}

/// Navigator that only logs the request.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn go_to(&self, route: Route) {
        info!(route = %route, "navigation requested");
    }
}

/// Navigator that remembers every request, newest last.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Routes requested so far.
    #[must_use]
    pub fn visited(&self) -> Vec<Route> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: Route) {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
