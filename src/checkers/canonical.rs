use crate::error::{ToolError, require};
use crate::parsers::{ExtractorKind, HtmlExtractor, is_canonical_link};
use crate::results::{Issue, ToolResult, no_errors};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalInput {
    pub html: String,
    /// Address the HTML was fetched from
    pub page_url: String,
    #[serde(default)]
    pub extractor: ExtractorKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalResult {
    pub is_valid: bool,
    pub has_canonical: bool,
    /// `href` exactly as written in the first canonical tag
    pub canonical_url: Option<String>,
    /// `canonical_url` resolved against the page URL
    pub resolved_url: Option<String>,
    pub is_self_referencing: bool,
    pub is_absolute: bool,
    pub canonical_count: usize,
    pub issues: Vec<Issue>,
}

/// Normalize a URL for equality checks: no fragment, no trailing slash on
/// non-root paths. Scheme and host case and default ports are already
/// normalized by the parser.
pub fn normalize_url(url: &Url) -> String {
    let mut normalized = url.clone();
    normalized.set_fragment(None);

    let path = normalized.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        normalized.set_path(path.trim_end_matches('/'));
    }
    normalized.to_string()
}

fn parse_page_url(page_url: &str) -> Result<Url, ToolError> {
    Url::parse(page_url.trim()).map_err(|source| ToolError::InvalidUrl {
        url: page_url.to_string(),
        source,
    })
}

/// Report on the canonical link of a page
pub fn check_canonical(input: &CanonicalInput) -> ToolResult<CanonicalResult> {
    ToolResult::run(|| {
        require(&input.html, "HTML")?;
        require(&input.page_url, "Page URL")?;
        let page_url = parse_page_url(&input.page_url)?;
        Ok(check_with(input.extractor.extractor(), &input.html, &page_url))
    })
}

fn check_with(extractor: &dyn HtmlExtractor, html: &str, page_url: &Url) -> CanonicalResult {
    let canonical_count = extractor
        .extract_tags(html, "link")
        .iter()
        .filter(|tag| is_canonical_link(tag))
        .count();
    let canonical_url = extractor.extract_canonical(html).map(|href| href.trim().to_string());

    let mut issues = Vec::new();
    let mut result = CanonicalResult {
        is_valid: true,
        has_canonical: canonical_count > 0,
        canonical_url: canonical_url.clone(),
        resolved_url: None,
        is_self_referencing: false,
        is_absolute: false,
        canonical_count,
        issues: Vec::new(),
    };

    if canonical_count > 1 {
        issues.push(Issue::error(format!(
            "Found {} canonical tags; search engines may ignore all of them",
            canonical_count
        )));
    }

    match canonical_url.as_deref() {
        None if canonical_count == 0 => {
            issues.push(Issue::warning("No canonical tag found"));
        }
        None | Some("") => {
            issues.push(Issue::error("Canonical tag has an empty href"));
        }
        Some(href) => {
            result.is_absolute = Url::parse(href).is_ok();
            if !result.is_absolute {
                issues.push(Issue::warning(format!(
                    "Canonical URL '{}' is relative; use an absolute URL",
                    href
                )));
            }

            match page_url.join(href) {
                Ok(resolved) => {
                    result.is_self_referencing = normalize_url(&resolved) == normalize_url(page_url);
                    issues.extend(compare_with_page(&resolved, page_url, result.is_self_referencing));
                    result.resolved_url = Some(resolved.to_string());
                }
                Err(e) => {
                    issues.push(Issue::error(format!(
                        "Canonical URL '{}' cannot be resolved: {}",
                        href, e
                    )));
                }
            }
        }
    }

    ::log::debug!(
        "Canonical check: {} tag(s), self-referencing={}",
        canonical_count,
        result.is_self_referencing
    );

    result.is_valid = no_errors(&issues);
    result.issues = issues;
    result
}

fn compare_with_page(resolved: &Url, page_url: &Url, self_referencing: bool) -> Vec<Issue> {
    let mut issues = Vec::new();

    if resolved.host_str() != page_url.host_str() {
        issues.push(Issue::warning(format!(
            "Canonical points to a different host ({})",
            resolved.host_str().unwrap_or("none")
        )));
    } else if resolved.scheme() != page_url.scheme() {
        issues.push(Issue::warning(format!(
            "Canonical uses {} while the page uses {}",
            resolved.scheme(),
            page_url.scheme()
        )));
    } else if !self_referencing {
        issues.push(Issue::info(format!(
            "Canonical points to another URL on this site: {}",
            resolved
        )));
    }

    if resolved.fragment().is_some() {
        issues.push(Issue::warning("Canonical URL contains a #fragment"));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str, page_url: &str) -> ToolResult<CanonicalResult> {
        check_canonical(&CanonicalInput {
            html: html.to_string(),
            page_url: page_url.to_string(),
            ..CanonicalInput::default()
        })
    }

    #[test]
    fn test_relative_self_reference() {
        let data = check(r#"<link rel="canonical" href="/page"/>"#, "https://x.com/page")
            .data
            .unwrap();
        assert!(data.has_canonical);
        assert!(data.is_self_referencing);
        assert!(!data.is_absolute);
        assert_eq!(data.resolved_url.as_deref(), Some("https://x.com/page"));
        assert!(data.is_valid);
    }

    #[test]
    fn test_trailing_slash_and_fragment_ignored() {
        let data = check(
            r#"<link href="HTTPS://X.com/page/" rel="Canonical">"#,
            "https://x.com/page#top",
        )
        .data
        .unwrap();
        assert!(data.is_self_referencing);
        assert!(data.is_absolute);
    }

    #[test]
    fn test_missing_canonical() {
        let data = check("<html><head></head></html>", "https://x.com/")
            .data
            .unwrap();
        assert!(!data.has_canonical);
        assert!(data.canonical_url.is_none());
        assert!(data.is_valid);
        assert!(data.issues.iter().any(|i| i.message.contains("No canonical")));
    }

    #[test]
    fn test_multiple_canonicals_is_error() {
        let html = r#"<link rel="canonical" href="https://x.com/a"><link rel=canonical href=https://x.com/b>"#;
        let data = check(html, "https://x.com/a").data.unwrap();
        assert_eq!(data.canonical_count, 2);
        assert_eq!(data.canonical_url.as_deref(), Some("https://x.com/a"));
        assert!(!data.is_valid);
    }

    #[test]
    fn test_cross_domain() {
        let data = check(
            r#"<link rel="canonical" href="https://other.com/page">"#,
            "https://x.com/page",
        )
        .data
        .unwrap();
        assert!(!data.is_self_referencing);
        assert!(data.issues.iter().any(|i| i.message.contains("different host")));
    }

    #[test]
    fn test_empty_href() {
        let data = check(r#"<link rel="canonical" href="">"#, "https://x.com/")
            .data
            .unwrap();
        assert!(data.has_canonical);
        assert!(!data.is_valid);
    }

    #[test]
    fn test_invalid_page_url_fails() {
        let result = check(r#"<link rel="canonical" href="/a">"#, "not a url");
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid URL"));
    }

    #[test]
    fn test_normalize_url() {
        let url = Url::parse("https://Example.com:443/a/b/#frag").unwrap();
        assert_eq!(normalize_url(&url), "https://example.com/a/b");
        let root = Url::parse("https://example.com").unwrap();
        assert_eq!(normalize_url(&root), "https://example.com/");
    }
}
