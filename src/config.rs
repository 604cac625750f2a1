//! Process configuration loaded from environment variables.

/// Runtime configuration for the service.
///
/// Credentials are optional at startup: the pipeline reports a missing key
/// as a stage error when the corresponding call is attempted, matching the
/// behavior callers see in the HTTP response body.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub resend_api_key: Option<String>,
    pub resend_base_url: String,
    pub resend_domain: String,
    pub admin_email: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:seo_reports.db?mode=rwc".into()),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            resend_api_key: std::env::var("RESEND_API_KEY").ok(),
            resend_base_url: std::env::var("RESEND_BASE_URL")
                .unwrap_or_else(|_| "https://api.resend.com".into()),
            resend_domain: std::env::var("RESEND_DOMAIN")
                .unwrap_or_else(|_| "review.growing-brands.de".into()),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@growing-brands.de".into()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| {
                    vec![
                        "http://localhost".into(),
                        "http://localhost:8080".into(),
                        "http://localhost:8081".into(),
                        "http://localhost:8082".into(),
                        "https://analyzer.growing-brands.de".into(),
                    ]
                }),
        }
    }
}
