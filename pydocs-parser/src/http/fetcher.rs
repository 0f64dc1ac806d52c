use anyhow::{Context, Result};
use reqwest::Client;

use super::cache::ResponseCache;
use super::types::CachedResponse;
use crate::config::ParserConfig;

/// HTTP client backed by the persistent response cache.
///
/// `fetch` never fails: transport errors are logged and reported as `None`
/// so the caller can skip that page and keep going.
pub struct Fetcher {
    client: Client,
    cache: ResponseCache,
}

impl Fetcher {
    pub fn new(config: &ParserConfig, cache: ResponseCache) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build reqwest client")?;
        Ok(Self { client, cache })
    }

    /// GET `url`, serving from the cache when possible.
    pub async fn fetch(&self, url: &str) -> Option<CachedResponse> {
        let key = ResponseCache::key_for(url);
        if let Some(cached) = self.cache.get(&key).await {
            return Some(cached);
        }

        let response = match self.load(url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to load page {}: {:?}", url, e);
                return None;
            }
        };

        if response.is_success() {
            if let Err(e) = self.cache.store(&key, &response).await {
                tracing::warn!("Failed to cache {}: {:#}", url, e);
            }
        } else {
            tracing::warn!("Page {} answered with HTTP {}", url, response.status);
        }

        Some(response)
    }

    async fn load(&self, url: &str) -> Result<CachedResponse> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;

        Ok(CachedResponse::new(
            final_url,
            status,
            String::from_utf8_lossy(&body).into_owned(),
        ))
    }

    /// Uncached binary GET. Failures here are errors of the caller's run.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {} (binary)", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Download of {} was refused", url))?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        Ok(bytes.to_vec())
    }
}
