//! Pages
//!
//! Top-level page components for each route.

pub mod admin;
pub mod home;
pub mod overview;

pub use admin::Admin;
pub use home::Home;
pub use overview::Overview;

use leptos::*;

/// The view a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Overview,
    Admin,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Overview, Page::Admin];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Overview => "/overview",
            Page::Admin => "/admin",
        }
    }

    /// Message key of the navigation label
    pub fn label_key(self) -> &'static str {
        match self {
            Page::Home => "nav.home",
            Page::Overview => "nav.overview",
            Page::Admin => "nav.admin",
        }
    }

    pub fn render(self) -> View {
        match self {
            Page::Home => view! { <Home /> }.into_view(),
            Page::Overview => view! { <Overview /> }.into_view(),
            Page::Admin => view! { <Admin /> }.into_view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_distinct() {
        let mut paths: Vec<_> = Page::ALL.iter().map(|page| page.path()).collect();
        paths.dedup();
        assert_eq!(paths, ["/", "/overview", "/admin"]);
        assert_eq!(Page::default(), Page::Home);
    }
}
