use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    SignIn,
    Dashboard,
}

impl Route {
    pub(crate) fn path(&self) -> String {
        match self {
            Self::SignIn => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
        }
    }
}

pub(crate) trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Turns navigation into a hint on stderr pointing at the matching command.
pub(crate) struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        debug!(route = %route.path(), "navigate");
        match route {
            Route::SignIn => eprintln!("Sign in with `agam login`."),
            Route::Dashboard => eprintln!("See your vaults with `agam vault list`."),
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingNavigator {
    routes: std::sync::Mutex<Vec<Route>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub(crate) fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }
}
