use std::time::Duration;

/// Explicit configuration for one pipeline instance.
///
/// Endpoints and the marketplace credential are passed in here at
/// construction time rather than read from ambient process state inside the
/// components, so test doubles can supply deterministic values.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// JSON-RPC endpoint for contract reads
    pub rpc_url: String,
    /// Gateway base path for content-addressed references
    pub gateway_base: String,
    /// Marketplace API base URL
    pub marketplace_url: String,
    /// Marketplace API key; requests may be rejected or rate-limited without one
    pub marketplace_api_key: Option<String>,
    /// Maximum concurrent in-flight requests per fan-out stage
    pub max_in_flight: usize,
    /// Deadline for each individual network call
    pub request_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://eth.llamarpc.com".to_string(),
            gateway_base: "https://ipfs.io/ipfs".to_string(),
            marketplace_url: "https://api.opensea.io/api/v1".to_string(),
            marketplace_api_key: None,
            max_in_flight: 8,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl PipelineConfig {
    /// Build a config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: std::env::var("ETH_RPC_URL").unwrap_or(defaults.rpc_url),
            gateway_base: std::env::var("IPFS_GATEWAY").unwrap_or(defaults.gateway_base),
            marketplace_url: std::env::var("MARKETPLACE_URL").unwrap_or(defaults.marketplace_url),
            marketplace_api_key: std::env::var("MARKETPLACE_API_KEY").ok(),
            max_in_flight: std::env::var("MAX_IN_FLIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_in_flight),
            request_timeout: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_timeout),
        }
    }
}
