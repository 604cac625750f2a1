use reqwest::{Client, StatusCode};

use crate::domain::models::RobotsTxt;
use crate::error::{AppError, Result};

/// Fetches target pages and their robots.txt.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// GET the page body, following redirects. Non-2xx statuses and
    /// transport failures (timeout, DNS, TLS) are fetch errors.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        log::info!("[FETCH] Fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("[FETCH] {} returned {}", url, status);
            return Err(AppError::fetch(format!("HTTP {} for {}", status, url)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch(format!("Failed to read body of {}: {}", url, e)))?;
        log::debug!("[FETCH] Received {} bytes from {}", body.len(), url);

        Ok(body)
    }

    /// Best-effort GET of `<url>/robots.txt`. Never fails: a non-200
    /// answer is `Missing`, a failed request is `Unreachable`.
    pub async fn fetch_robots_txt(&self, url: &str) -> RobotsTxt {
        let robots_url = format!("{}/robots.txt", url.trim_end_matches('/'));
        log::debug!("[FETCH] Checking robots.txt: {}", robots_url);

        match self.client.get(&robots_url).send().await {
            Ok(response) if response.status() == StatusCode::OK => match response.text().await {
                Ok(body) => RobotsTxt::Found(body),
                Err(e) => {
                    log::debug!("[FETCH] Failed to read robots.txt body: {}", e);
                    RobotsTxt::Unreachable
                }
            },
            Ok(response) => {
                log::debug!("[FETCH] robots.txt returned {}", response.status());
                RobotsTxt::Missing
            }
            Err(e) => {
                log::debug!("[FETCH] robots.txt request failed: {}", e);
                RobotsTxt::Unreachable
            }
        }
    }
}
