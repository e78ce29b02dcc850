use crate::error::require;
use crate::results::ToolResult;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

/// Sitemaps protocol cap on entries per file
pub const MAX_SITEMAP_URLS: usize = 50_000;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

static LOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<loc\b[^>]*>(.*?)</loc\s*>").unwrap());

static LASTMOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<lastmod\b[^>]*>(.*?)</lastmod\s*>").unwrap());

static SITEMAP_INDEX_ROOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<sitemapindex\b").unwrap());

static URLSET_ROOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<urlset\b").unwrap());

/// W3C Datetime: YYYY, YYYY-MM, YYYY-MM-DD, or a full timestamp with zone
static W3C_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\d{4}(?:-(?:0[1-9]|1[0-2])(?:-(?:0[1-9]|[12]\d|3[01])(?:T(?:[01]\d|2[0-3]):[0-5]\d(?::[0-5]\d(?:\.\d+)?)?(?:Z|[+-](?:[01]\d|2[0-3]):[0-5]\d))?)?)?$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SitemapInput {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapType {
    Urlset,
    Index,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapResult {
    pub is_valid: bool,
    pub sitemap_type: SitemapType,
    /// Number of page URLs (always 0 for an index)
    pub url_count: usize,
    pub urls: Vec<String>,
    pub nested_sitemaps: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub last_mod_dates: Vec<String>,
    pub duplicate_urls: Vec<String>,
}

/// Count and check the entries of a sitemap or sitemap index
pub fn analyze_sitemap(input: &SitemapInput) -> ToolResult<SitemapResult> {
    ToolResult::run(|| {
        require(&input.content, "Sitemap content")?;
        Ok(analyze(&input.content))
    })
}

fn analyze(content: &str) -> SitemapResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let sitemap_type = if SITEMAP_INDEX_ROOT.is_match(content) {
        SitemapType::Index
    } else if URLSET_ROOT.is_match(content) {
        SitemapType::Urlset
    } else {
        errors.push("Missing <urlset> or <sitemapindex> root element".to_string());
        SitemapType::Unknown
    };

    if !content.trim_start().starts_with("<?xml") {
        warnings.push("Missing XML declaration".to_string());
    }
    if sitemap_type != SitemapType::Unknown && !content.contains(SITEMAP_NAMESPACE) {
        warnings.push(format!("Missing sitemap namespace {}", SITEMAP_NAMESPACE));
    }

    // Entries are taken exactly as written (trimmed) so duplicates are found
    // on the raw text
    let locations: Vec<String> = LOC
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect();

    if locations.is_empty() {
        warnings.push("No <loc> entries found".to_string());
    }

    let mut seen = HashSet::new();
    let mut duplicate_urls = Vec::new();
    for loc in &locations {
        if loc.is_empty() {
            errors.push("Empty <loc> entry".to_string());
            continue;
        }
        if let Err(e) = Url::parse(&unescape_xml(loc)) {
            errors.push(format!("Invalid URL: {} ({})", loc, e));
        }
        if !seen.insert(loc.as_str()) && !duplicate_urls.contains(loc) {
            duplicate_urls.push(loc.clone());
        }
    }
    for duplicate in &duplicate_urls {
        warnings.push(format!("Duplicate URL: {}", duplicate));
    }

    if locations.len() > MAX_SITEMAP_URLS {
        errors.push(format!(
            "Sitemap has {} entries; the limit is {}",
            locations.len(),
            MAX_SITEMAP_URLS
        ));
    }

    let last_mod_dates: Vec<String> = LASTMOD
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect();
    for date in &last_mod_dates {
        if !W3C_DATETIME.is_match(date) {
            warnings.push(format!("Invalid <lastmod> date: {}", date));
        }
    }

    let (urls, nested_sitemaps) = match sitemap_type {
        SitemapType::Index => (Vec::new(), locations),
        SitemapType::Urlset | SitemapType::Unknown => (locations, Vec::new()),
    };

    ::log::debug!(
        "Sitemap ({:?}): {} urls, {} nested sitemaps, {} errors",
        sitemap_type,
        urls.len(),
        nested_sitemaps.len(),
        errors.len()
    );

    SitemapResult {
        is_valid: errors.is_empty(),
        sitemap_type,
        url_count: urls.len(),
        urls,
        nested_sitemaps,
        errors,
        warnings,
        last_mod_dates,
        duplicate_urls,
    }
}

/// `<loc>` values are XML-escaped (`&amp;` in query strings)
fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_str(content: &str) -> SitemapResult {
        analyze_sitemap(&SitemapInput {
            content: content.to_string(),
        })
        .data
        .unwrap()
    }

    #[test]
    fn test_sitemap_index() {
        let data = analyze_str(
            "<sitemapindex><sitemap><loc>https://x/a.xml</loc></sitemap></sitemapindex>",
        );
        assert_eq!(data.nested_sitemaps, vec!["https://x/a.xml"]);
        assert!(data.urls.is_empty());
        assert_eq!(data.url_count, 0);
        assert_eq!(data.sitemap_type, SitemapType::Index);
        assert!(data.is_valid);
    }

    #[test]
    fn test_urlset() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc><lastmod>2024-01-15</lastmod></url>
  <url><loc> https://example.com/about </loc><lastmod>2024-02-01T10:00:00+00:00</lastmod></url>
  <url><loc>https://example.com/search?q=a&amp;b=c</loc></url>
</urlset>"#;
        let data = analyze_str(content);
        assert!(data.is_valid);
        assert!(data.warnings.is_empty());
        assert_eq!(data.url_count, 3);
        assert_eq!(data.urls[1], "https://example.com/about");
        assert_eq!(data.last_mod_dates.len(), 2);
    }

    #[test]
    fn test_invalid_urls_collected() {
        let data = analyze_str(
            "<urlset><url><loc>not a url</loc></url><url><loc>/relative</loc></url><url><loc>https://ok.com/</loc></url></urlset>",
        );
        assert!(!data.is_valid);
        assert_eq!(data.errors.len(), 2);
        assert_eq!(data.url_count, 3);
    }

    #[test]
    fn test_duplicates_compare_raw_text() {
        let data = analyze_str(
            "<urlset><url><loc>https://x.com/a</loc></url><url><loc>https://x.com/a</loc></url><url><loc>https://x.com/a/</loc></url><url><loc>https://x.com/a</loc></url></urlset>",
        );
        assert_eq!(data.duplicate_urls, vec!["https://x.com/a"]);
        assert!(data.is_valid);
    }

    #[test]
    fn test_missing_root() {
        let data = analyze_str("<loc>https://x.com/</loc>");
        assert_eq!(data.sitemap_type, SitemapType::Unknown);
        assert!(!data.is_valid);
        assert_eq!(data.urls, vec!["https://x.com/"]);
    }

    #[test]
    fn test_bad_lastmod_warns() {
        let data = analyze_str(
            "<urlset><url><loc>https://x.com/</loc><lastmod>15/01/2024</lastmod></url></urlset>",
        );
        assert!(data.is_valid);
        assert!(data.warnings.iter().any(|w| w.contains("15/01/2024")));
    }

    #[test]
    fn test_w3c_datetime() {
        for ok in ["2024", "2024-05", "2024-05-09", "2024-05-09T08:30Z", "2024-05-09T08:30:15.5-04:00"] {
            assert!(W3C_DATETIME.is_match(ok), "{}", ok);
        }
        for bad in ["24-05-09", "2024-13-01", "2024-05-09T25:00Z", "2024-05-09T08:30"] {
            assert!(!W3C_DATETIME.is_match(bad), "{}", bad);
        }
    }
}
