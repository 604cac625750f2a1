//! Domain entities for the SEO report pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ====== Enums ======

/// Outcome of the robots.txt side-fetch.
///
/// `Missing` (server answered, no file) and `Unreachable` (the request
/// itself failed) are distinct states; the snapshot flattens both to an
/// absent value, but callers and tests can still tell them apart here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsTxt {
    Found(String),
    Missing,
    Unreachable,
}

impl RobotsTxt {
    pub fn content(&self) -> Option<&str> {
        match self {
            RobotsTxt::Found(body) => Some(body),
            RobotsTxt::Missing | RobotsTxt::Unreachable => None,
        }
    }

    pub fn into_content(self) -> Option<String> {
        match self {
            RobotsTxt::Found(body) => Some(body),
            RobotsTxt::Missing | RobotsTxt::Unreachable => None,
        }
    }
}

// ====== Extracted page elements ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageElement {
    pub src: String,
    pub alt: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkElement {
    pub href: String,
    pub text: String,
    pub rel: String,
}

// ====== Snapshot ======

/// The extracted SEO facts for one page fetch.
///
/// Built once per scrape, never mutated. Missing tags yield empty strings
/// or empty containers, never an error. `headings` is keyed "h1".."h6"
/// (all six keys always present); element sequences preserve document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoSnapshot {
    pub title: String,
    pub meta_description: String,
    pub meta_tags: BTreeMap<String, String>,
    pub canonical: String,
    pub robots: String,
    pub og_tags: BTreeMap<String, String>,
    pub twitter_tags: BTreeMap<String, String>,
    pub headings: BTreeMap<String, Vec<String>>,
    pub images: Vec<ImageElement>,
    pub links: Vec<LinkElement>,
    pub sitemap_url: Option<String>,
    pub robots_txt: Option<String>,
    pub raw_html: String,
}

// ====== Persisted report ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub seo_data: SeoSnapshot,
    pub gpt_report: String,
}

/// Persisted record pairing a URL, its snapshot, and the generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoReport {
    pub id: String,
    pub url: String,
    pub report_data: ReportData,
}

// ====== Email ======

/// Ephemeral message value, serialized directly into the Resend request body.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}
