use std::collections::BTreeMap;
use std::sync::OnceLock;

use scraper::{Html, Selector};

use crate::domain::models::{ImageElement, LinkElement, SeoSnapshot};

pub struct PageExtractor;

impl PageExtractor {
    pub fn extract_title(html: &Html) -> String {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
        html.select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    /// All `<meta>` tags keyed by `name`, falling back to `property`.
    /// Later duplicates overwrite earlier ones.
    pub fn extract_meta_tags(html: &Html) -> BTreeMap<String, String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta").unwrap());

        let mut tags = BTreeMap::new();
        for element in html.select(selector) {
            let key = element
                .value()
                .attr("name")
                .or_else(|| element.value().attr("property"))
                .unwrap_or("");
            let content = element.value().attr("content").unwrap_or("");
            tags.insert(key.to_string(), content.to_string());
        }
        tags
    }

    pub fn extract_canonical(html: &Html) -> String {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("link[rel='canonical']").unwrap());
        html.select(selector)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Open Graph tags: metas whose `property` starts with `og:`.
    pub fn extract_og_tags(html: &Html) -> BTreeMap<String, String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta").unwrap());

        html.select(selector)
            .filter_map(|el| {
                let property = el.value().attr("property")?;
                if !property.starts_with("og:") {
                    return None;
                }
                let content = el.value().attr("content").unwrap_or("");
                Some((property.to_string(), content.to_string()))
            })
            .collect()
    }

    /// Twitter card tags: metas whose `name` starts with `twitter:`.
    pub fn extract_twitter_tags(html: &Html) -> BTreeMap<String, String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta").unwrap());

        html.select(selector)
            .filter_map(|el| {
                let name = el.value().attr("name")?;
                if !name.starts_with("twitter:") {
                    return None;
                }
                let content = el.value().attr("content").unwrap_or("");
                Some((name.to_string(), content.to_string()))
            })
            .collect()
    }

    /// Heading text grouped per level. All six keys ("h1".."h6") are always
    /// present; within a level, texts keep document order.
    pub fn extract_headings(html: &Html) -> BTreeMap<String, Vec<String>> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

        let mut headings: BTreeMap<String, Vec<String>> =
            (1..=6).map(|i| (format!("h{}", i), Vec::new())).collect();

        for element in html.select(selector) {
            let tag = element.value().name().to_string();
            let text = element.text().collect::<String>().trim().to_string();
            if let Some(level) = headings.get_mut(&tag) {
                level.push(text);
            }
        }
        headings
    }

    /// Every `<img>` in document order; only src/alt/title are kept.
    pub fn extract_images(html: &Html) -> Vec<ImageElement> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("img").unwrap());

        html.select(selector)
            .map(|element| ImageElement {
                src: element.value().attr("src").unwrap_or("").to_string(),
                alt: element.value().attr("alt").unwrap_or("").to_string(),
                title: element.value().attr("title").unwrap_or("").to_string(),
            })
            .collect()
    }

    /// Every `<a>` in document order; only href/text/rel are kept.
    pub fn extract_links(html: &Html) -> Vec<LinkElement> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("a").unwrap());

        html.select(selector)
            .map(|element| LinkElement {
                href: element.value().attr("href").unwrap_or("").to_string(),
                text: element.text().collect::<String>().trim().to_string(),
                rel: element.value().attr("rel").unwrap_or("").to_string(),
            })
            .collect()
    }

    pub fn extract_sitemap_url(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("link[rel='sitemap']").unwrap());
        html.select(selector)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::to_string)
    }

    /// Assemble a full snapshot from raw HTML and an already-resolved
    /// robots.txt body. Total: any input yields a snapshot.
    pub fn build_snapshot(raw_html: &str, robots_txt: Option<String>) -> SeoSnapshot {
        let html = Html::parse_document(raw_html);

        let meta_tags = Self::extract_meta_tags(&html);
        let meta_description = meta_tags.get("description").cloned().unwrap_or_default();
        let robots = meta_tags.get("robots").cloned().unwrap_or_default();

        SeoSnapshot {
            title: Self::extract_title(&html),
            meta_description,
            meta_tags,
            canonical: Self::extract_canonical(&html),
            robots,
            og_tags: Self::extract_og_tags(&html),
            twitter_tags: Self::extract_twitter_tags(&html),
            headings: Self::extract_headings(&html),
            images: Self::extract_images(&html),
            links: Self::extract_links(&html),
            sitemap_url: Self::extract_sitemap_url(&html),
            robots_txt,
            raw_html: raw_html.to_string(),
        }
    }
}
