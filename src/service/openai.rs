use reqwest::Client;
use serde_json::json;

use crate::domain::models::SeoSnapshot;
use crate::error::{AppError, Result};

const MODEL: &str = "gpt-4o";
const TEMPERATURE: f64 = 0.2;
const MAX_TOKENS: u32 = 1800;

/// Raw HTML is truncated to this many characters before it enters the
/// prompt, so prompt size stays bounded regardless of page size.
const HTML_EXCERPT_CHARS: usize = 2000;

/// Generates the narrative SEO report via the OpenAI chat completion API.
pub struct ReportGenerator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ReportGenerator {
    pub fn new(client: Client, api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Build the fixed report prompt from selected snapshot fields.
    pub fn build_prompt(url: &str, seo_data: &SeoSnapshot) -> String {
        let html_excerpt: String = seo_data.raw_html.chars().take(HTML_EXCERPT_CHARS).collect();
        let h1 = seo_data
            .headings
            .get("h1")
            .map(|texts| texts.join(", "))
            .unwrap_or_default();

        format!(
            "\
Du bist ein professioneller SEO-Experte. Analysiere die folgende Website umfassend und liefere einen strukturierten Bericht mit:
- Meta-Tags (Title, Description, Robots)
- Überschriftenstruktur (H1, H2, H3)
- Keyword-Analyse (Häufigkeit, Relevanz)
- Mobile Optimierung
- Interne/Externe Links
- Technische SEO (Indexierung, Canonical, Sitemap, Robots.txt)
- Content-Qualität
- Backlinks (falls erkennbar)
- Social Signals (falls erkennbar)
- Konkrete, priorisierte Verbesserungsvorschläge für jede Kategorie
Nutze klare Überschriften und nummerierte Listen. Am Ende: Zusammenfassung und Top-5 Sofortmaßnahmen.

URL: {url}

Meta Title: {title}
Meta Description: {description}
H1: {h1}

HTML-Auszug:
{html_excerpt}",
            url = url,
            title = seo_data.title,
            description = seo_data.meta_description,
            h1 = h1,
            html_excerpt = html_excerpt,
        )
    }

    /// Request one completion for the report prompt. No retry, no streaming.
    pub async fn generate(&self, url: &str, seo_data: &SeoSnapshot) -> Result<String> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                log::error!("[GPT] OpenAI API key is not configured");
                return Err(AppError::generation("OPENAI_API_KEY fehlt!"));
            }
        };

        let prompt = Self::build_prompt(url, seo_data);
        log::info!("[GPT] Sending prompt to OpenAI ({} chars)", prompt.len());

        let request_body = json!({
            "model": MODEL,
            "messages": [{"role": "system", "content": prompt}],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::generation(format!("OpenAI-Fehler: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("[GPT] OpenAI returned {}: {}", status, body);
            return Err(AppError::generation(format!(
                "OpenAI-Fehler: {} {}",
                status, body
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::generation(format!("OpenAI-Fehler: {}", e)))?;

        let text = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::generation("OpenAI-Fehler: leere Antwort"))?;

        log::info!("[GPT] Report received ({} chars)", text.len());
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::PageExtractor;
    use crate::service::http::create_client;

    fn snapshot_with_html(raw_html: &str) -> SeoSnapshot {
        PageExtractor::build_snapshot(raw_html, None)
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_network_call() {
        let generator = ReportGenerator::new(create_client().unwrap(), None, "http://127.0.0.1:1");
        let err = generator
            .generate("https://example.com", &snapshot_with_html("<html></html>"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "OPENAI_API_KEY fehlt!");
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_empty_api_key_counts_as_missing() {
        let generator = ReportGenerator::new(
            create_client().unwrap(),
            Some(String::new()),
            "http://127.0.0.1:1",
        );
        let err = generator
            .generate("https://example.com", &snapshot_with_html("<html></html>"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "OPENAI_API_KEY fehlt!");
    }

    #[test]
    fn test_prompt_html_contribution_is_bounded() {
        let big_page = format!("<html><body>{}</body></html>", "x".repeat(50_000));
        let snapshot = snapshot_with_html(&big_page);
        let prompt = ReportGenerator::build_prompt("https://example.com", &snapshot);

        // everything except the excerpt is fixed-size; the excerpt is capped
        let excerpt: String = big_page.chars().take(HTML_EXCERPT_CHARS).collect();
        assert!(prompt.ends_with(&excerpt));
        assert!(prompt.len() < excerpt.len() + 2000);
    }

    #[test]
    fn test_prompt_truncation_respects_char_boundaries() {
        // multi-byte characters around the cut must not panic
        let page = format!("<html><body>{}</body></html>", "ä".repeat(3000));
        let snapshot = snapshot_with_html(&page);
        let prompt = ReportGenerator::build_prompt("https://example.com", &snapshot);
        assert!(prompt.contains("HTML-Auszug:"));
    }

    #[test]
    fn test_prompt_embeds_snapshot_fields() {
        let snapshot = snapshot_with_html(
            r#"<html><head><title>Shop</title>
               <meta name="description" content="Best shop"></head>
               <body><h1>Welcome</h1><h1>Again</h1></body></html>"#,
        );
        let prompt = ReportGenerator::build_prompt("https://shop.example", &snapshot);
        assert!(prompt.contains("URL: https://shop.example"));
        assert!(prompt.contains("Meta Title: Shop"));
        assert!(prompt.contains("Meta Description: Best shop"));
        assert!(prompt.contains("H1: Welcome, Again"));
    }

    #[tokio::test]
    async fn test_generate_returns_completion_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r##"{"choices":[{"message":{"role":"assistant","content":"# SEO Bericht\nAlles gut."}}]}"##,
            )
            .create_async()
            .await;

        let generator =
            ReportGenerator::new(create_client().unwrap(), Some("key".into()), server.url());
        let report = generator
            .generate("https://example.com", &snapshot_with_html("<html></html>"))
            .await
            .unwrap();
        assert_eq!(report, "# SEO Bericht\nAlles gut.");
    }

    #[tokio::test]
    async fn test_generate_maps_api_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let generator =
            ReportGenerator::new(create_client().unwrap(), Some("key".into()), server.url());
        let err = generator
            .generate("https://example.com", &snapshot_with_html("<html></html>"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("OpenAI-Fehler:"));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let generator =
            ReportGenerator::new(create_client().unwrap(), Some("key".into()), server.url());
        let err = generator
            .generate("https://example.com", &snapshot_with_html("<html></html>"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "OpenAI-Fehler: leere Antwort");
    }
}
