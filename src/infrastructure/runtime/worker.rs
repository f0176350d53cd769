//! Async worker - runs in Tokio runtime and handles RPC operations

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Duration;

use anyhow::Result;

use crate::infrastructure::ethereum::{create_provider, ProviderConfig};
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};
use crate::probe::{describe, fetch_node_version, ProbeSink, ProbeState};

/// Drops sink output; the returned [`ProbeState`] is forwarded as an event instead
struct QuietSink;

impl ProbeSink for QuietSink {
    fn success(&mut self, _version: &str) {}
    fn failure(&mut self, _error: &anyhow::Error) {}
}

/// Run the async worker loop
pub async fn run_async_worker(
    endpoint: ProviderConfig,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    let endpoint_name = endpoint.display();

    match create_provider(endpoint).await {
        Ok(provider) => {
            let state = fetch_node_version(provider.as_ref(), &mut QuietSink).await;
            let _ = evt_tx.send(RuntimeEvent::Probe {
                endpoint: endpoint_name,
                state,
            });

            let chain_id = match provider.chain_id().await {
                Ok(id) => Some(id),
                Err(err) => {
                    tracing::warn!(error = %describe(&err), "chain id request failed");
                    None
                }
            };
            let _ = evt_tx.send(RuntimeEvent::ChainId { chain_id });
        }
        Err(err) => {
            let message = describe(&err);
            tracing::error!(endpoint = %endpoint_name, error = %message, "connect failed");
            let _ = evt_tx.send(RuntimeEvent::Probe {
                endpoint: endpoint_name,
                state: ProbeState::Failed(message),
            });
            let _ = evt_tx.send(RuntimeEvent::ChainId { chain_id: None });
        }
    }

    // Nothing else to do; stay alive until the UI lets go.
    loop {
        match cmd_rx.try_recv() {
            Ok(RuntimeCommand::Shutdown) | Err(TryRecvError::Disconnected) => return Ok(()),
            Err(TryRecvError::Empty) => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[tokio::test]
    async fn test_bad_endpoint_reports_failure_then_shuts_down() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        cmd_tx.send(RuntimeCommand::Shutdown).unwrap();

        run_async_worker(ProviderConfig::Http("nope".to_string()), cmd_rx, evt_tx)
            .await
            .unwrap();

        let events: Vec<RuntimeEvent> = evt_rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            RuntimeEvent::Probe { state: ProbeState::Failed(_), .. }
        ));
        assert_eq!(events[1], RuntimeEvent::ChainId { chain_id: None });
    }
}
