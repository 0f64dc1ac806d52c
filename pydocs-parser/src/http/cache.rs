use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use super::types::CachedResponse;

const ENTRY_SUFFIX: &str = ".json";

/// What one cache file holds. The key is kept so entries stay inspectable.
#[derive(Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    response: CachedResponse,
}

/// On-disk HTTP response cache: one JSON file per request key, named by the
/// key's SHA-256 digest.
///
/// Entries never expire; the whole cache is wiped with [`ResponseCache::clear`].
pub struct ResponseCache {
    cache_dir: PathBuf,
}

impl ResponseCache {
    /// Open (and create if needed) the cache rooted at `cache_dir`.
    pub async fn open<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir)
                .await
                .with_context(|| format!("Failed to create cache directory {:?}", cache_dir))?;
            info!("Created cache directory: {:?}", cache_dir);
        }
        Ok(Self { cache_dir })
    }

    /// Request key for a GET of `url`
    pub fn key_for(url: &str) -> String {
        format!("GET {}", url)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        self.cache_dir
            .join(format!("{:x}{}", hasher.finalize(), ENTRY_SUFFIX))
    }

    /// Look up a cached response. Unreadable entries count as a miss.
    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read cache entry {:?}: {}", path, e);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&content) {
            Ok(entry) if entry.key == key => {
                debug!("Cache hit: {}", key);
                Some(entry.response)
            }
            Ok(entry) => {
                warn!("Cache entry {:?} belongs to {}, not {}", path, entry.key, key);
                None
            }
            Err(e) => {
                warn!("Corrupt cache entry {:?}: {}", path, e);
                None
            }
        }
    }

    pub async fn store(&self, key: &str, response: &CachedResponse) -> Result<()> {
        let path = self.entry_path(key);
        let entry = CacheEntry {
            key: key.to_string(),
            response: response.clone(),
        };
        let content = serde_json::to_string(&entry).context("Failed to serialize cache entry")?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write cache entry {:?}", path))?;
        debug!("Cached: {}", key);
        Ok(())
    }

    /// Remove every entry. Returns how many were removed.
    pub async fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        let mut entries = fs::read_dir(&self.cache_dir)
            .await
            .with_context(|| format!("Failed to list cache directory {:?}", self.cache_dir))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_entry_file(&path) {
                fs::remove_file(&path)
                    .await
                    .with_context(|| format!("Failed to delete cache entry {:?}", path))?;
                removed += 1;
            }
        }

        info!("Cleared {} cached responses from {:?}", removed, self.cache_dir);
        Ok(removed)
    }

    pub async fn len(&self) -> Result<usize> {
        let mut count = 0;
        let mut entries = fs::read_dir(&self.cache_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if is_entry_file(&entry.path()) {
                count += 1;
            }
        }
        Ok(count)
    }
}

fn is_entry_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(ENTRY_SUFFIX))
}
