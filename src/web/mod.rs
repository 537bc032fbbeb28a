//! HTML dashboard: page registry, view models and handlers

pub mod chart;
pub mod handlers;
pub mod view_models;

/// Pages of the dashboard
///
/// The same list drives route registration and the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    TeamStats,
    Quarterbacks,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::TeamStats, Page::Quarterbacks];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::TeamStats => "Team Stats",
            Page::Quarterbacks => "Quarterback Stats",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::TeamStats => "/teams",
            Page::Quarterbacks => "/quarterbacks",
        }
    }
}

/// One navigation menu entry
#[derive(Debug, Clone)]
pub struct NavLink {
    pub title: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Navigation menu with `current` highlighted
pub fn nav_links(current: Page) -> Vec<NavLink> {
    Page::ALL
        .iter()
        .map(|page| NavLink {
            title: page.title(),
            path: page.path(),
            active: *page == current,
        })
        .collect()
}
