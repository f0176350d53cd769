//! One-shot node version probe
//!
//! Issues a single `web3_clientVersion` request and reports the outcome to a
//! [`ProbeSink`]. Failures never leave this module: they go to the sink's
//! failure channel and the caller carries on.

use std::fmt;
use std::io::Write;

use crate::infrastructure::ethereum::{create_provider, EthereumProvider, ProviderConfig};

/// Probe lifecycle as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProbeState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl ProbeState {
    pub fn version(&self) -> Option<&str> {
        match self {
            ProbeState::Succeeded(version) => Some(version),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeState::Idle => f.write_str("not probed"),
            ProbeState::Pending => f.write_str("probing…"),
            ProbeState::Succeeded(version) => f.write_str(version),
            ProbeState::Failed(err) => write!(f, "unreachable ({})", err),
        }
    }
}

/// Success and failure channels for the probe result
pub trait ProbeSink {
    fn success(&mut self, version: &str);
    fn failure(&mut self, error: &anyhow::Error);
}

/// Writes successes to one stream and failures to another
pub struct StdioSink<O, E> {
    out: O,
    err: E,
}

impl StdioSink<std::io::Stdout, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<O: Write, E: Write> StdioSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> ProbeSink for StdioSink<O, E> {
    fn success(&mut self, version: &str) {
        let _ = writeln!(self.out, "Client Version: {}", version);
    }

    fn failure(&mut self, error: &anyhow::Error) {
        let _ = writeln!(self.err, "Error fetching client version: {}", describe(error));
    }
}

/// One line for an error chain, skipping causes the outer message already repeats
pub fn describe(error: &anyhow::Error) -> String {
    let mut parts: Vec<String> = Vec::new();
    for cause in error.chain() {
        let text = cause.to_string();
        if text.is_empty() || parts.iter().any(|part| part.contains(&text)) {
            continue;
        }
        // a cause that restates the previous message with more detail replaces it
        if let Some(last) = parts.last_mut() {
            if text.contains(last.as_str()) {
                *last = text;
                continue;
            }
        }
        parts.push(text);
    }
    parts.join(": ")
}

/// Ask `provider` for its client version once
pub async fn fetch_node_version(
    provider: &dyn EthereumProvider,
    sink: &mut dyn ProbeSink,
) -> ProbeState {
    let endpoint = provider.endpoint_name();
    tracing::debug!(%endpoint, "requesting client version");
    match provider.client_version().await {
        Ok(version) => {
            tracing::info!(%endpoint, %version, "node version");
            sink.success(&version);
            ProbeState::Succeeded(version)
        }
        Err(err) => {
            let message = describe(&err);
            tracing::warn!(%endpoint, error = %message, "client version request failed");
            sink.failure(&err);
            ProbeState::Failed(message)
        }
    }
}

/// Connect to `config` and probe it once. A connection failure is a probe failure.
pub async fn run_probe(config: ProviderConfig, sink: &mut dyn ProbeSink) -> ProbeState {
    let endpoint_name = config.display();
    match create_provider(config).await {
        Ok(provider) => fetch_node_version(provider.as_ref(), sink).await,
        Err(err) => {
            let message = describe(&err);
            tracing::warn!(endpoint = %endpoint_name, error = %message, "connect failed");
            sink.failure(&err);
            ProbeState::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};

    struct StubProvider {
        version: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl EthereumProvider for StubProvider {
        async fn client_version(&self) -> Result<String> {
            match self.version {
                Some(version) => Ok(version.to_string()),
                None => Err(anyhow!("connection refused")),
            }
        }

        async fn chain_id(&self) -> Result<u64> {
            Ok(11_155_111)
        }

        fn endpoint_name(&self) -> String {
            "stub".to_string()
        }
    }

    #[derive(Default)]
    struct Recorder {
        successes: Vec<String>,
        failures: Vec<String>,
    }

    impl ProbeSink for Recorder {
        fn success(&mut self, version: &str) {
            self.successes.push(version.to_string());
        }

        fn failure(&mut self, error: &anyhow::Error) {
            self.failures.push(error.to_string());
        }
    }

    #[tokio::test]
    async fn test_success_goes_to_success_channel_only() {
        let provider = StubProvider {
            version: Some("Geth/v1.2.3"),
        };
        let mut sink = Recorder::default();
        let state = fetch_node_version(&provider, &mut sink).await;

        assert_eq!(sink.successes, vec!["Geth/v1.2.3".to_string()]);
        assert!(sink.failures.is_empty());
        assert_eq!(state.version(), Some("Geth/v1.2.3"));
    }

    #[tokio::test]
    async fn test_failure_goes_to_failure_channel_only() {
        let provider = StubProvider { version: None };
        let mut sink = Recorder::default();
        let state = fetch_node_version(&provider, &mut sink).await;

        assert!(sink.successes.is_empty());
        assert_eq!(sink.failures, vec!["connection refused".to_string()]);
        assert_eq!(state, ProbeState::Failed("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_stdio_sink_formats_streams() {
        let provider = StubProvider {
            version: Some("Geth/v1.2.3"),
        };
        let mut sink = StdioSink::new(Vec::new(), Vec::new());
        fetch_node_version(&provider, &mut sink).await;
        fetch_node_version(&StubProvider { version: None }, &mut sink).await;

        let (out, err) = sink.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "Client Version: Geth/v1.2.3\n");
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Error fetching client version: connection refused\n"
        );
    }

    #[tokio::test]
    async fn test_bad_endpoint_fails_without_panicking() {
        let mut sink = Recorder::default();
        let state = run_probe(ProviderConfig::Http("::not-a-url::".to_string()), &mut sink).await;
        assert!(matches!(state, ProbeState::Failed(_)));
        assert_eq!(sink.failures.len(), 1);
        assert!(sink.successes.is_empty());
    }

    #[test]
    fn test_describe_skips_repeated_causes() {
        let repeated = anyhow!("connection refused")
            .context("error sending request for url (http://x/): connection refused")
            .context("error sending request for url (http://x/)");
        assert_eq!(
            describe(&repeated),
            "error sending request for url (http://x/): connection refused"
        );

        let nested = anyhow!("refused").context("connect failed");
        assert_eq!(describe(&nested), "connect failed: refused");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ProbeState::Idle.to_string(), "not probed");
        assert_eq!(
            ProbeState::Succeeded("reth/1.0".into()).to_string(),
            "reth/1.0"
        );
        assert_eq!(ProbeState::Failed("x".into()).version(), None);
    }
}
