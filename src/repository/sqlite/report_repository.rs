use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::models::{ReportData, SeoReport};
use crate::error::{AppError, Result};
use crate::repository::ReportRepository;

pub struct SqliteReportRepository {
    pool: SqlitePool,
}

impl SqliteReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for SqliteReportRepository {
    async fn save(&self, url: &str, data: &ReportData) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let payload = serde_json::to_string(data)
            .map_err(|e| AppError::store(format!("Failed to encode report data: {}", e)))?;
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO seo_reports (id, url, report_data, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(url)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::store(format!("Failed to insert SEO report: {}", e)))?;

        log::debug!("[STORE] Inserted report {} for {}", id, url);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<SeoReport>> {
        let row = sqlx::query("SELECT id, url, report_data FROM seo_reports WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::store(format!("Failed to fetch SEO report: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row.get("report_data");
        let report_data: ReportData = serde_json::from_str(&raw)
            .map_err(|e| AppError::store(format!("Failed to decode report data: {}", e)))?;

        Ok(Some(SeoReport {
            id: row.get("id"),
            url: row.get("url"),
            report_data,
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM seo_reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::store(format!("Failed to delete SEO report: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::PageExtractor;

    /// Creates an in-memory SQLite database with migrations applied
    async fn setup_test_db() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    fn sample_report_data() -> ReportData {
        ReportData {
            seo_data: PageExtractor::build_snapshot(
                r#"<html><head><title>Example</title><meta name="description" content="desc"></head>
                   <body><h1>Hello</h1><img src="/a.png" alt="a"><a href="/x" rel="nofollow">X</a></body></html>"#,
                Some("User-agent: *".to_string()),
            ),
            gpt_report: "# Bericht\n\nAlles gut.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_then_get_round_trips_report_data() {
        let pool = setup_test_db().await;
        let repo = SqliteReportRepository::new(pool);

        let data = sample_report_data();
        let id = repo.save("https://example.com", &data).await.unwrap();
        assert!(Uuid::parse_str(&id).is_ok(), "id should be a uuid");

        let report = repo.get(&id).await.unwrap().expect("report should exist");
        assert_eq!(report.id, id);
        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.report_data, data);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let pool = setup_test_db().await;
        let repo = SqliteReportRepository::new(pool);

        let missing = repo.get(&Uuid::new_v4().to_string()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_a_row_was_removed() {
        let pool = setup_test_db().await;
        let repo = SqliteReportRepository::new(pool);

        let id = repo
            .save("https://example.com", &sample_report_data())
            .await
            .unwrap();

        assert!(repo.delete(&id).await.unwrap());
        assert!(repo.get(&id).await.unwrap().is_none());
        // second delete finds nothing
        assert!(!repo.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_each_save_generates_a_fresh_id() {
        let pool = setup_test_db().await;
        let repo = SqliteReportRepository::new(pool);

        let data = sample_report_data();
        let first = repo.save("https://example.com", &data).await.unwrap();
        let second = repo.save("https://example.com", &data).await.unwrap();
        assert_ne!(first, second);
    }
}
