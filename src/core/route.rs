//! Routes and the in-process router that consumes navigation requests

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("empty route")]
    Empty,
    #[error("route contains whitespace: {0:?}")]
    Whitespace(String),
}

/// A normalized path such as `/` or `/create-campaign`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route(String);

impl Route {
    pub const HOME: &'static str = "/";
    pub const CREATE_CAMPAIGN: &'static str = "/create-campaign";
    pub const PROFILE: &'static str = "/profile";

    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(RouteError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(RouteError::Whitespace(trimmed.to_string()));
        }
        let path = trimmed.trim_matches('/');
        if path.is_empty() {
            return Ok(Self::home());
        }
        Ok(Self(format!("/{}", path)))
    }

    pub fn home() -> Self {
        Self(Self::HOME.to_string())
    }

    pub fn create_campaign() -> Self {
        Self(Self::CREATE_CAMPAIGN.to_string())
    }

    pub fn profile() -> Self {
        Self(Self::PROFILE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn page(&self) -> Page {
        match self.0.as_str() {
            Self::HOME => Page::Home,
            Self::CREATE_CAMPAIGN => Page::CreateCampaign,
            Self::PROFILE => Page::Profile,
            other => Page::NotFound(other.to_string()),
        }
    }
}

impl TryFrom<String> for Route {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Route::parse(&value)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pages the router can display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    CreateCampaign,
    Profile,
    NotFound(String),
}

impl Page {
    pub fn title(&self) -> &str {
        match self {
            Page::Home => "All Campaigns",
            Page::CreateCampaign => "Start a Campaign",
            Page::Profile => "Profile",
            Page::NotFound(_) => "Not Found",
        }
    }
}

/// Current route plus back-history
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            current: Route::home(),
            history: Vec::new(),
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn page(&self) -> Page {
        self.current.page()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Navigate to `route`. Navigating to the current route does not grow history.
    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::debug!(from = %self.current, to = %route, "navigate");
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }
}
