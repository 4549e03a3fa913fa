//! Static route table

use super::RouterError;

/// A path and the view it renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<V> {
    pub path: String,
    pub view: V,
}

/// Ordered, validated path → view mapping.
///
/// Paths are matched exactly after normalization. There are no dynamic
/// segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
}

impl<V> RouteTable<V> {
    /// Build from `(path, view)` pairs. Every path must start with `/` and
    /// be unique after normalization.
    pub fn new<P: Into<String>>(
        routes: impl IntoIterator<Item = (P, V)>,
    ) -> Result<Self, RouterError> {
        let mut table = Self { routes: Vec::new() };
        for (path, view) in routes {
            let path = normalize_path(&path.into())?;
            if table.contains(&path) {
                return Err(RouterError::DuplicatePath(path));
            }
            table.routes.push(Route { path, view });
        }
        Ok(table)
    }

    pub fn resolve(&self, path: &str) -> Option<&V> {
        let path = normalize_path(path).ok()?;
        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(|route| &route.view)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<V>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strip query, fragment and trailing slashes. The path must start with `/`.
pub fn normalize_path(path: &str) -> Result<String, RouterError> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim();

    if !path.starts_with('/') {
        return Err(RouterError::InvalidPath(path.to_string()));
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new([("/", "home"), ("/overview", "overview"), ("/admin", "admin")]).unwrap()
    }

    #[test]
    fn test_resolve_registered_paths() {
        let table = table();
        assert_eq!(table.resolve("/"), Some(&"home"));
        assert_eq!(table.resolve("/overview"), Some(&"overview"));
        assert_eq!(table.resolve("/admin"), Some(&"admin"));
        assert_eq!(table.len(), 3);
        assert_eq!(table.paths().collect::<Vec<_>>(), ["/", "/overview", "/admin"]);
    }

    #[test]
    fn test_resolve_normalizes() {
        let table = table();
        assert_eq!(table.resolve("/admin/"), Some(&"admin"));
        assert_eq!(table.resolve("/overview?day=1#top"), Some(&"overview"));
        assert_eq!(table.resolve("/nope"), None);
        assert_eq!(table.resolve("admin"), None);
        assert_eq!(table.resolve("/Admin"), None);
    }

    #[test]
    fn test_rejects_invalid_and_duplicate_paths() {
        assert!(matches!(
            RouteTable::new([("admin", 1)]),
            Err(RouterError::InvalidPath(_))
        ));
        assert!(matches!(
            RouteTable::new([("/admin", 1), ("/admin/", 2)]),
            Err(RouterError::DuplicatePath(path)) if path == "/admin"
        ));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/").unwrap(), "/");
        assert_eq!(normalize_path("///").unwrap(), "/");
        assert_eq!(normalize_path("/a/b/").unwrap(), "/a/b");
        assert_eq!(normalize_path("/?q=1").unwrap(), "/");
        assert!(normalize_path("").is_err());
        assert!(normalize_path("?q=1").is_err());
    }
}
