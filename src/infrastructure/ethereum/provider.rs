//! Ethereum provider abstraction and Alloy implementations

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use anyhow::{Context, Result};

/// Default public Sepolia endpoint
pub const DEFAULT_RPC: &str = "https://rpc.ankr.com/eth_sepolia";

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
}

impl ProviderConfig {
    /// Pick the transport from the URL scheme
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url.starts_with("ws://") || url.starts_with("wss://") {
            ProviderConfig::WebSocket(url.to_string())
        } else {
            ProviderConfig::Http(url.to_string())
        }
    }

    /// Get display name for this endpoint
    pub fn display(&self) -> String {
        match self {
            ProviderConfig::Http(url) => url.clone(),
            ProviderConfig::WebSocket(url) => url.clone(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Http(DEFAULT_RPC.to_string())
    }
}

/// The node queries the client needs
#[async_trait::async_trait]
pub trait EthereumProvider: Send + Sync + 'static {
    /// `web3_clientVersion`
    async fn client_version(&self) -> Result<String>;

    /// `eth_chainId`
    async fn chain_id(&self) -> Result<u64>;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

/// Alloy-backed provider over HTTP or WebSocket
pub struct AlloyProvider {
    provider: DynProvider,
    endpoint: String,
}

/// Create a provider from configuration
pub async fn create_provider(config: ProviderConfig) -> Result<Box<dyn EthereumProvider>> {
    let endpoint = config.display();
    let provider = match config {
        ProviderConfig::Http(url) => {
            let rpc_url = url.parse().context("Invalid HTTP URL")?;
            ProviderBuilder::new().connect_http(rpc_url).erased()
        }
        ProviderConfig::WebSocket(url) => ProviderBuilder::new()
            .connect(&url)
            .await
            .context("Failed to create WebSocket provider")?
            .erased(),
    };
    Ok(Box::new(AlloyProvider { provider, endpoint }))
}

#[async_trait::async_trait]
impl EthereumProvider for AlloyProvider {
    async fn client_version(&self) -> Result<String> {
        Ok(self.provider.get_client_version().await?)
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_url() {
        assert_eq!(
            ProviderConfig::from_url("wss://eth.example/ws"),
            ProviderConfig::WebSocket("wss://eth.example/ws".to_string())
        );
        assert_eq!(
            ProviderConfig::from_url(" http://localhost:8545 "),
            ProviderConfig::Http("http://localhost:8545".to_string())
        );
        assert_eq!(ProviderConfig::default().display(), DEFAULT_RPC);
    }

    #[tokio::test]
    async fn test_invalid_http_url_is_an_error() {
        let result = create_provider(ProviderConfig::Http("not a url".to_string())).await;
        assert!(result.is_err());
    }
}
