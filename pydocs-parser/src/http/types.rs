///! HTTP response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every page body is decoded with this charset, whatever the server claims
pub const FORCED_ENCODING: &str = "utf-8";

/// A fetched page as stored in the response cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Charset the body was decoded with
    pub encoding: String,
    /// Decoded body
    pub text: String,
    /// When the response was received from the network
    pub fetched_at: DateTime<Utc>,
}

impl CachedResponse {
    pub fn new(url: String, status: u16, text: String) -> Self {
        Self {
            url,
            status,
            encoding: FORCED_ENCODING.to_string(),
            text,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
