//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The TUI (ratatui) runs on the main thread; node requests run on a Tokio
//! runtime owned by a background thread. The two sides talk over channels.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tokio::runtime::Runtime;

use crate::infrastructure::ethereum::ProviderConfig;
use crate::infrastructure::runtime::worker::run_async_worker;
use crate::probe::{describe, ProbeState};

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// The startup probe resolved
    Probe { endpoint: String, state: ProbeState },
    /// Chain id reported by the node, `None` when the request failed
    ChainId { chain_id: Option<u64> },
    /// Error occurred
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Start the worker; it probes `endpoint` once, then idles until shutdown
    pub fn new(endpoint: ProviderConfig) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = Runtime::new()?;
        thread::Builder::new()
            .name("crowdfund-runtime".to_string())
            .spawn(move || {
                rt.block_on(async {
                    if let Err(err) = run_async_worker(endpoint, cmd_rx, evt_tx.clone()).await {
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {}", describe(&err)),
                        });
                    }
                });
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        self.evt_rx.try_iter().collect()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
