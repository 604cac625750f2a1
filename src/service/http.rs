use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

/// Factory for the shared outbound HTTP client.
///
/// One client serves every outbound call group (target site, OpenAI,
/// Resend); reqwest's pool is safe for concurrent use. Redirects are
/// followed by default; the timeout bounds unresponsive targets.
pub fn create_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")
}
