//! In-memory navigation history

/// Ordered stack of visited paths with a cursor.
///
/// Starts with exactly `/`. Pushing after going back discards the forward
/// entries, as a browser does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    position: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self {
            entries: vec!["/".to_string()],
            position: 0,
        }
    }

    /// Path at the cursor
    pub fn location(&self) -> &str {
        &self.entries[self.position]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.position + 1);
        self.entries.push(path.into());
        self.position = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    /// Move the cursor one entry back
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.position -= 1;
        Some(self.location())
    }

    /// Move the cursor one entry forward
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.position += 1;
        Some(self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_root() {
        let history = MemoryHistory::new();
        assert_eq!(history.entries(), ["/"]);
        assert_eq!(history.location(), "/");
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_push_back_forward() {
        let mut history = MemoryHistory::new();
        history.push("/overview");
        history.push("/admin");
        assert_eq!(history.location(), "/admin");

        assert_eq!(history.back(), Some("/overview"));
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("/overview"));
        assert_eq!(history.position(), 1);
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = MemoryHistory::new();
        history.push("/overview");
        history.push("/admin");
        history.back();
        history.back();

        history.push("/admin");
        assert_eq!(history.entries(), ["/", "/admin"]);
        assert_eq!(history.forward(), None);
    }
}
