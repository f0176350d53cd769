pub mod action;
pub mod command;
pub mod module;
pub mod nav;
pub mod route;

pub use action::{Action, NotifyLevel};
pub use command::{parse_command, Command};
pub use module::Module;
pub use nav::{default_links, link_form, Icon, LinkForm, NavLink, NavShell, DEFAULT_ACTIVE};
pub use route::{Page, Route, RouteError, Router};
