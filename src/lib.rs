//! Terminal client for a crowdfunding DApp
//!
//! A sidebar navigation shell over the campaign pages, plus a one-shot probe
//! that asks the configured Ethereum node for its client version.

pub mod app;
pub mod campaign;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod logging;
pub mod probe;
pub mod ui;
