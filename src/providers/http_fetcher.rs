use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::Client;
use tracing::debug;

use crate::traits::document_fetcher::DocumentFetcher;

/// HTTP document fetcher with a cache keyed by resolved URL.
///
/// Content-addressed documents are immutable, so cached entries never go
/// stale and repeat fetches across runs are served locally.
pub struct HttpDocumentFetcher {
    client: Client,
    cache: Arc<DashMap<String, serde_json::Value>>,
}

impl HttpDocumentFetcher {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build metadata HTTP client")?;

        Ok(Self {
            client,
            cache: Arc::new(DashMap::new()),
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        if let Some(doc) = self.cache.get(url) {
            debug!("metadata cache hit for {}", url);
            return Ok(doc.clone());
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("metadata fetch failed for {}", url))?;

        if !response.status().is_success() {
            bail!(
                "metadata fetch for {} returned status {}",
                url,
                response.status()
            );
        }

        let doc: serde_json::Value = response
            .json()
            .await
            .with_context(|| format!("metadata at {} is not valid JSON", url))?;

        self.cache.insert(url.to_string(), doc.clone());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Minimal local HTTP responder that counts the requests it serves
    async fn spawn_responder(hits: Arc<AtomicUsize>, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                hits.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn second_fetch_for_same_url_is_served_from_cache() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_responder(hits.clone(), r#"{"name":"Ape #1"}"#).await;
        let url = format!("{}/meta/1.json", base);

        let fetcher = HttpDocumentFetcher::new(Duration::from_secs(5)).unwrap();

        let first = fetcher.fetch_json(&url).await.unwrap();
        assert_eq!(first["name"], "Ape #1");
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let second = fetcher.fetch_json(&url).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_urls_are_fetched_separately() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_responder(hits.clone(), "{}").await;

        let fetcher = HttpDocumentFetcher::new(Duration::from_secs(5)).unwrap();
        fetcher
            .fetch_json(&format!("{}/meta/1.json", base))
            .await
            .unwrap();
        fetcher
            .fetch_json(&format!("{}/meta/2.json", base))
            .await
            .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
