use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use sqlx::SqlitePool;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::models::{ReportData, SeoSnapshot};
use crate::error::{AppError, Result};
use crate::extractor::PageExtractor;
use crate::repository::sqlite::SqliteReportRepository;
use crate::repository::ReportRepository;
use crate::service::fetcher::PageFetcher;
use crate::service::http::create_client;
use crate::service::mailer::Mailer;
use crate::service::openai::ReportGenerator;

/// Result of a successful pipeline run, returned verbatim to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedReport {
    pub report_id: String,
    pub seo_data: SeoSnapshot,
    pub gpt_report: String,
}

/// The dependency object driving the fetch, extract, generate, store,
/// notify sequence for one request. Built once at startup and shared
/// across requests; the only shared state is the HTTP client pool and the
/// database pool, both safe for concurrent use.
pub struct ReportPipeline {
    fetcher: PageFetcher,
    generator: ReportGenerator,
    mailer: Mailer,
    repository: Arc<dyn ReportRepository>,
    admin_email: String,
}

impl ReportPipeline {
    pub fn new(
        fetcher: PageFetcher,
        generator: ReportGenerator,
        mailer: Mailer,
        repository: Arc<dyn ReportRepository>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            generator,
            mailer,
            repository,
            admin_email: admin_email.into(),
        }
    }

    pub fn from_config(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let client = create_client()?;
        Ok(Self::new(
            PageFetcher::new(client.clone()),
            ReportGenerator::new(
                client.clone(),
                config.openai_api_key.clone(),
                config.openai_base_url.clone(),
            ),
            Mailer::new(
                client,
                config.resend_api_key.clone(),
                config.resend_base_url.clone(),
                config.resend_domain.clone(),
            ),
            Arc::new(SqliteReportRepository::new(pool)),
            config.admin_email.clone(),
        ))
    }

    /// Run the full pipeline for one URL and email the report to the admin
    /// address.
    ///
    /// Stages run strictly in sequence and there is no rollback: if the
    /// notify stage fails after the store stage succeeded, the stored
    /// report remains. The returned error is the failing stage's error;
    /// the route layer decides how to present it.
    pub async fn generate_report(&self, url: &str) -> Result<CreatedReport> {
        log::info!("[PIPELINE] Starting SEO report for {}", url);
        Url::from_str(url).map_err(|_| AppError::fetch(format!("Invalid URL: {}", url)))?;

        let raw_html = self.fetcher.fetch(url).await?;
        let robots_txt = self.fetcher.fetch_robots_txt(url).await;
        let snapshot = PageExtractor::build_snapshot(&raw_html, robots_txt.into_content());
        log::debug!(
            "[PIPELINE] Extracted snapshot: {} meta tags, {} images, {} links",
            snapshot.meta_tags.len(),
            snapshot.images.len(),
            snapshot.links.len()
        );

        let gpt_report = self.generator.generate(url, &snapshot).await?;

        let report_data = ReportData {
            seo_data: snapshot,
            gpt_report,
        };
        let report_id = self.repository.save(url, &report_data).await?;
        log::info!("[PIPELINE] Report stored with id {}", report_id);

        self.mailer
            .send_report(&report_data.gpt_report, &self.admin_email, url)
            .await?;
        log::info!("[PIPELINE] Report sent to {}", self.admin_email);

        Ok(CreatedReport {
            report_id,
            seo_data: report_data.seo_data,
            gpt_report: report_data.gpt_report,
        })
    }

    /// Look up a stored report and email it to `to`.
    pub async fn resend_report(&self, report_id: &str, to: &str) -> Result<()> {
        let report = self
            .repository
            .get(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bericht nicht gefunden".into()))?;

        self.mailer
            .send_report(&report.report_data.gpt_report, to, &report.url)
            .await
    }

    /// Delete a stored report. The id must parse as a UUID before the
    /// backend is contacted at all.
    pub async fn delete_report(&self, report_id: &str) -> Result<()> {
        if Uuid::parse_str(report_id).is_err() {
            return Err(AppError::Validation("Ungültige Bericht-ID".into()));
        }

        if self.repository.delete(report_id).await? {
            log::info!("[PIPELINE] Deleted report {}", report_id);
            Ok(())
        } else {
            Err(AppError::NotFound("Bericht nicht gefunden".into()))
        }
    }
}
