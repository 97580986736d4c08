use async_trait::async_trait;

/// Retrieval of metadata documents by resolved location
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch and parse the JSON document at the given location
    async fn fetch_json(&self, url: &str) -> anyhow::Result<serde_json::Value>;
}
