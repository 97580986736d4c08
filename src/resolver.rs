//! Normalizes content-addressed storage references into fetchable URLs.

/// Rewrites `ipfs://` references onto a configured gateway. Anything else,
/// including the empty string, passes through unchanged; absence of a usable
/// location is the caller's concern.
#[derive(Debug, Clone)]
pub struct ContentAddressResolver {
    gateway_base: String,
}

impl ContentAddressResolver {
    pub fn new(gateway_base: impl Into<String>) -> Self {
        let mut base = gateway_base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { gateway_base: base }
    }

    /// Resolve a reference into a fetchable location. Never fails.
    pub fn resolve(&self, reference: &str) -> String {
        match reference.strip_prefix("ipfs://") {
            Some(rest) => {
                // Some tokens embed a redundant "ipfs/" path segment
                let path = rest.strip_prefix("ipfs/").unwrap_or(rest);
                format!("{}/{}", self.gateway_base, path.trim_start_matches('/'))
            }
            None => reference.to_string(),
        }
    }
}
