use async_trait::async_trait;

use crate::domain::models::{ReportData, SeoReport};
use crate::error::Result;

pub mod sqlite;

/// Persistence operations for SEO reports.
///
/// `save` owns id generation and returns the new id; callers never extract
/// it from a backend response themselves.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn save(&self, url: &str, data: &ReportData) -> Result<String>;
    async fn get(&self, id: &str) -> Result<Option<SeoReport>>;
    /// Returns whether a row was actually removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}
