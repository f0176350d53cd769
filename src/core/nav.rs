//! Sidebar navigation: link descriptors and the active-selection state

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent};
use serde::Deserialize;

use super::{Action, Module, Route};

/// Name that is active before any link has been selected
pub const DEFAULT_ACTIVE: &str = "Home";

/// Icon shown for a navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Logo,
    Dashboard,
    CreateCampaign,
    Payment,
    Profile,
    Withdraw,
    Logout,
    Sun,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Logo => "◆",
            Icon::Dashboard => "▦",
            Icon::CreateCampaign => "✚",
            Icon::Payment => "¤",
            Icon::Profile => "☺",
            Icon::Withdraw => "⇩",
            Icon::Logout => "⏻",
            Icon::Sun => "☼",
        }
    }
}

/// One navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavLink {
    pub id: String,
    pub name: String,
    #[serde(rename = "link")]
    pub route: Route,
    pub icon: Icon,
    #[serde(default)]
    pub disabled: bool,
}

impl NavLink {
    pub fn new(id: &str, name: &str, route: Route, icon: Icon) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            route,
            icon,
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// The built-in sidebar entries
pub fn default_links() -> Vec<NavLink> {
    vec![
        NavLink::new("dashboard", "Home", Route::home(), Icon::Dashboard),
        NavLink::new(
            "create-campaign",
            "Start campaign",
            Route::create_campaign(),
            Icon::CreateCampaign,
        ),
        // Not implemented yet; shown but never selectable.
        NavLink::new("edit-campaign", "Edit campaign", Route::home(), Icon::Payment).disabled(),
        NavLink::new("profile", "Profile", Route::profile(), Icon::Profile),
    ]
}

/// How a link renders in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkForm {
    /// Icon and label
    Expanded,
    IconOnly,
}

/// Render form of `link` given the active selection
pub fn link_form(link: &NavLink, active: &str) -> LinkForm {
    if link.name == active {
        LinkForm::Expanded
    } else {
        LinkForm::IconOnly
    }
}

/// Owns the link list and the active selection
#[derive(Debug, Clone)]
pub struct NavShell {
    links: Vec<NavLink>,
    active: String,
    cursor: usize,
}

impl NavShell {
    pub fn new(links: Vec<NavLink>, default_active: &str) -> Self {
        let shell = Self {
            links,
            active: default_active.to_string(),
            cursor: 0,
        };
        for name in shell.duplicate_names() {
            tracing::warn!(name, "several sidebar links share a name; selection is ambiguous");
        }
        shell
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_active(&self, link: &NavLink) -> bool {
        link_form(link, &self.active) == LinkForm::Expanded
    }

    /// Select a link. Disabled links are ignored.
    pub fn select_link(&mut self, link: &NavLink) -> Action {
        if link.disabled {
            tracing::debug!(name = %link.name, "ignoring disabled link");
            return Action::None;
        }
        self.active = link.name.clone();
        Action::Navigate(link.route.clone())
    }

    pub fn select_index(&mut self, index: usize) -> Action {
        let Some(link) = self.links.get(index).cloned() else {
            return Action::None;
        };
        self.cursor = index;
        self.select_link(&link)
    }

    /// Select the first link named `name`
    pub fn select_name(&mut self, name: &str) -> Option<Action> {
        let index = self
            .links
            .iter()
            .position(|link| link.name.eq_ignore_ascii_case(name))?;
        Some(self.select_index(index))
    }

    pub fn move_cursor(&mut self, down: bool) {
        if self.links.is_empty() {
            return;
        }
        self.cursor = if down {
            (self.cursor + 1).min(self.links.len() - 1)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for link in &self.links {
            *counts.entry(link.name.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect()
    }
}

impl Module for NavShell {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(false);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(true);
                Action::None
            }
            KeyCode::Enter => self.select_index(self.cursor),
            KeyCode::Backspace | KeyCode::Char('b') => Action::Back,
            _ => Action::None,
        }
    }
}
