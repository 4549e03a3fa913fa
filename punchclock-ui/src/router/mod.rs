//! Client-side routing
//!
//! A [`Router`] couples a static [`RouteTable`] with an in-memory
//! [`MemoryHistory`]. Navigation is synchronous: the router is
//! `Transitioning` only while the history is being updated.

pub mod history;
pub mod table;

pub use history::MemoryHistory;
pub use table::{normalize_path, Route, RouteTable};

/// Routing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("no route for path '{0}'")]
    NotFound(String),

    #[error("invalid path '{0}': paths must start with '/'")]
    InvalidPath(String),

    #[error("duplicate route '{0}'")]
    DuplicatePath(String),
}

/// Navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Transitioning,
}

/// Route table plus navigation history
#[derive(Debug, Clone)]
pub struct Router<V> {
    table: RouteTable<V>,
    history: MemoryHistory,
    state: RouterState,
}

impl<V> Router<V> {
    pub fn new(table: RouteTable<V>) -> Self {
        Self {
            table,
            history: MemoryHistory::new(),
            state: RouterState::Idle,
        }
    }

    pub fn from_routes<P: Into<String>>(
        routes: impl IntoIterator<Item = (P, V)>,
    ) -> Result<Self, RouterError> {
        Ok(Self::new(RouteTable::new(routes)?))
    }

    /// View registered for `path`, without navigating
    pub fn resolve(&self, path: &str) -> Option<&V> {
        self.table.resolve(path)
    }

    /// Make `path` the current location.
    ///
    /// An unregistered path is rejected and leaves the history untouched.
    /// Navigating to the current location does not add an entry.
    pub fn navigate(&mut self, path: &str) -> Result<&V, RouterError> {
        let path = normalize_path(path).map_err(|e| {
            log::warn!("Rejected navigation: {}", e);
            e
        })?;
        if !self.table.contains(&path) {
            log::warn!("No route for path '{}'", path);
            return Err(RouterError::NotFound(path));
        }

        self.state = RouterState::Transitioning;
        if path != self.history.location() {
            log::debug!("Navigating from '{}' to '{}'", self.history.location(), path);
            self.history.push(path.as_str());
        }
        self.state = RouterState::Idle;

        self.table
            .resolve(&path)
            .ok_or(RouterError::NotFound(path))
    }

    /// Step back in history
    pub fn back(&mut self) -> Option<&V> {
        self.history.back()?;
        self.table.resolve(self.history.location())
    }

    /// Step forward in history
    pub fn forward(&mut self) -> Option<&V> {
        self.history.forward()?;
        self.table.resolve(self.history.location())
    }

    pub fn current_path(&self) -> &str {
        self.history.location()
    }

    pub fn current_view(&self) -> Option<&V> {
        self.table.resolve(self.history.location())
    }

    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    pub fn state(&self) -> RouterState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum View {
        Home,
        Overview,
        Admin,
    }

    fn router() -> Router<View> {
        Router::from_routes([
            ("/", View::Home),
            ("/overview", View::Overview),
            ("/admin", View::Admin),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let router = router();
        assert_eq!(router.current_path(), "/");
        assert_eq!(router.current_view(), Some(&View::Home));
        assert_eq!(router.history().entries(), ["/"]);
        assert_eq!(router.state(), RouterState::Idle);
    }

    #[test]
    fn test_resolve_does_not_navigate() {
        let router = router();
        assert_eq!(router.resolve("/admin"), Some(&View::Admin));
        assert_eq!(router.resolve("/missing"), None);
        assert_eq!(router.current_path(), "/");
    }

    #[test]
    fn test_navigate_pushes_history() {
        let mut router = router();
        assert_eq!(router.navigate("/overview"), Ok(&View::Overview));
        assert_eq!(router.navigate("/admin/"), Ok(&View::Admin));

        assert_eq!(router.current_path(), "/admin");
        assert_eq!(router.history().entries(), ["/", "/overview", "/admin"]);
        assert_eq!(router.state(), RouterState::Idle);
    }

    #[test]
    fn test_navigate_to_current_path_is_noop() {
        let mut router = router();
        router.navigate("/admin").unwrap();
        router.navigate("/admin").unwrap();
        assert_eq!(router.history().entries(), ["/", "/admin"]);
    }

    #[test]
    fn test_navigate_unknown_path_keeps_history() {
        let mut router = router();
        router.navigate("/overview").unwrap();

        assert_eq!(
            router.navigate("/reports"),
            Err(RouterError::NotFound("/reports".to_string()))
        );
        assert!(matches!(
            router.navigate("admin"),
            Err(RouterError::InvalidPath(_))
        ));
        assert_eq!(router.current_path(), "/overview");
        assert_eq!(router.history().entries().len(), 2);
    }

    #[test]
    fn test_back_and_forward() {
        let mut router = router();
        router.navigate("/overview").unwrap();
        router.navigate("/admin").unwrap();

        assert_eq!(router.back(), Some(&View::Overview));
        assert_eq!(router.back(), Some(&View::Home));
        assert_eq!(router.back(), None);
        assert_eq!(router.forward(), Some(&View::Overview));
        assert_eq!(router.current_path(), "/overview");
    }
}
