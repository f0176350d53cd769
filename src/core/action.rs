//! Actions that modules return to communicate with the app

use super::Route;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Ask the router to show a route
    Navigate(Route),

    /// Go back to the previous route
    Back,

    /// Copy text to the system clipboard
    Copy(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
