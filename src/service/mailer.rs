use pulldown_cmark::{html, Options, Parser};
use reqwest::Client;

use crate::domain::models::EmailMessage;
use crate::error::{AppError, Result};

const SUBJECT: &str = "Ihr ausführlicher SEO-Bericht";

/// Convert the markdown report into the fixed HTML email template.
pub fn build_email_html(subject: &str, markdown_content: &str, url: &str) -> String {
    let parser = Parser::new_ext(markdown_content, Options::all());
    let mut html_content = String::new();
    html::push_html(&mut html_content, parser);

    format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{subject}</title>
    <style>
        body {{ font-family: system-ui, -apple-system, sans-serif; background: #f9fafb; color: #222; }}
        .container {{ max-width: 600px; margin: 40px auto; background: #fff; border-radius: 8px; box-shadow: 0 2px 8px #0001; padding: 32px; }}
        h1, h2, h3 {{ color: #10B981; }}
        a {{ color: #10B981; }}
        .footer {{ color: #888; font-size: 13px; margin-top: 32px; text-align: center; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>SEO-Analysebericht</h1>
        <p style="color:#6B7280;">für <a href="{url}">{url}</a></p>
        {html_content}
        <div class="footer">
            <p>Automatisch erstellt von <a href="https://growing-brands.de">Growing Brands SEO Agent</a></p>
        </div>
    </div>
</body>
</html>
"#,
        subject = subject,
        url = url,
        html_content = html_content,
    )
}

/// Sends rendered reports through the Resend transactional email API.
pub struct Mailer {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    sender_domain: String,
}

impl Mailer {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        base_url: impl Into<String>,
        sender_domain: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
            sender_domain: sender_domain.into(),
        }
    }

    /// Render the markdown report and post it to the email API. The send is
    /// external and irreversible; no sent-state is recorded locally.
    pub async fn send_report(&self, report_markdown: &str, to: &str, url: &str) -> Result<()> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                log::error!("[MAIL] Resend API key is not configured");
                return Err(AppError::notify("RESEND_API_KEY fehlt!"));
            }
        };

        log::info!("[MAIL] Sending report to {}", to);
        let message = EmailMessage {
            from: format!("SEO Agent <report@{}>", self.sender_domain),
            to: vec![to.to_string()],
            subject: SUBJECT.to_string(),
            html: build_email_html(SUBJECT, report_markdown, url),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&message)
            .send()
            .await
            .map_err(|e| AppError::notify(format!("Resend-Fehler: {}", e)))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            log::error!("[MAIL] Resend rejected the message: {} {}", status, body);
            return Err(AppError::notify(format!("Resend-Fehler: {}", body)));
        }

        log::info!("[MAIL] Report accepted by provider ({})", status);
        Ok(())
    }
}
