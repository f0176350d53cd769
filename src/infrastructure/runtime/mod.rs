//! Runtime bridge between the synchronous TUI and the Tokio worker

mod bridge;
mod worker;

pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
