use crate::error::require;
use crate::parsers::{ExtractorKind, HtmlExtractor};
use crate::results::{Issue, ToolResult};
use serde::{Deserialize, Serialize};

/// `<meta name=...>` values that carry robots directives
const ROBOTS_META_NAMES: [&str; 7] = [
    "robots",
    "googlebot",
    "googlebot-news",
    "bingbot",
    "slurp",
    "yandex",
    "duckduckbot",
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoindexInput {
    pub html: String,
    /// Raw `X-Robots-Tag` response header value, if the caller has it
    #[serde(default)]
    pub x_robots_tag: Option<String>,
    #[serde(default)]
    pub extractor: ExtractorKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsMetaTag {
    /// Lower-cased `name` attribute (which crawler it targets)
    pub name: String,
    pub content: String,
    pub directives: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoindexResult {
    pub is_indexable: bool,
    pub is_followable: bool,
    pub meta_tags: Vec<RobotsMetaTag>,
    pub header_directives: Vec<String>,
    pub issues: Vec<Issue>,
}

/// Split a robots directive list ("noindex, nofollow") into lower-case
/// directives. `X-Robots-Tag` values may be prefixed with a crawler name
/// ("googlebot: noindex"), which is dropped.
pub fn parse_directives(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(|part| {
            let part = part.trim();
            match part.split_once(':') {
                Some((agent, rest))
                    if !agent.contains(char::is_whitespace)
                        && !is_parameterized(agent)
                        && !rest.trim().is_empty() =>
                {
                    rest.trim()
                }
                _ => part,
            }
        })
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Directives like `max-snippet:50` use a colon for their value
fn is_parameterized(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "max-snippet" | "max-image-preview" | "max-video-preview" | "unavailable_after"
    )
}

fn blocks_indexing(directives: &[String]) -> bool {
    directives.iter().any(|d| d == "noindex" || d == "none")
}

fn blocks_following(directives: &[String]) -> bool {
    directives.iter().any(|d| d == "nofollow" || d == "none")
}

/// Determine whether a page may be indexed and its links followed
pub fn check_noindex(input: &NoindexInput) -> ToolResult<NoindexResult> {
    ToolResult::run(|| {
        require(&input.html, "HTML")?;
        Ok(check_with(
            input.extractor.extractor(),
            &input.html,
            input.x_robots_tag.as_deref(),
        ))
    })
}

fn check_with(extractor: &dyn HtmlExtractor, html: &str, header: Option<&str>) -> NoindexResult {
    let meta_tags: Vec<RobotsMetaTag> = extractor
        .extract_tags(html, "meta")
        .into_iter()
        .filter_map(|tag| {
            let name = tag.attr("name")?.trim().to_lowercase();
            if !ROBOTS_META_NAMES.contains(&name.as_str()) {
                return None;
            }
            let content = tag.attr("content").unwrap_or("").trim().to_string();
            Some(RobotsMetaTag {
                directives: parse_directives(&content),
                name,
                content,
            })
        })
        .collect();

    let header_directives = header.map(parse_directives).unwrap_or_default();

    let mut issues = Vec::new();
    let mut all: Vec<String> = header_directives.clone();

    for tag in &meta_tags {
        all.extend(tag.directives.iter().cloned());

        let has_index = tag.directives.iter().any(|d| d == "index");
        if has_index && blocks_indexing(&tag.directives) {
            issues.push(Issue::warning(format!(
                "<meta name=\"{}\"> has conflicting index and noindex directives",
                tag.name
            )));
        }
        if tag.content.is_empty() {
            issues.push(Issue::warning(format!(
                "<meta name=\"{}\"> has no content",
                tag.name
            )));
        }
    }

    if meta_tags.iter().filter(|t| t.name == "robots").count() > 1 {
        issues.push(Issue::warning(
            "Multiple robots meta tags; the most restrictive directive applies",
        ));
    }

    let is_indexable = !blocks_indexing(&all);
    let is_followable = !blocks_following(&all);

    if !is_indexable {
        let source = if blocks_indexing(&header_directives) {
            "X-Robots-Tag header"
        } else {
            "robots meta tag"
        };
        issues.push(Issue::error(format!(
            "Page is blocked from indexing by the {}",
            source
        )));
    }
    if !is_followable {
        issues.push(Issue::warning("Links on this page will not be followed"));
    }
    if all.iter().any(|d| d == "nosnippet") {
        issues.push(Issue::info("nosnippet hides the description in search results"));
    }

    ::log::debug!(
        "Noindex check: {} robots meta tag(s), indexable={}",
        meta_tags.len(),
        is_indexable
    );

    NoindexResult {
        is_indexable,
        is_followable,
        meta_tags,
        header_directives,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str, header: Option<&str>) -> NoindexResult {
        check_noindex(&NoindexInput {
            html: html.to_string(),
            x_robots_tag: header.map(str::to_string),
            ..NoindexInput::default()
        })
        .data
        .unwrap()
    }

    #[test]
    fn test_indexable_by_default() {
        let data = check("<html><head><title>x</title></head></html>", None);
        assert!(data.is_indexable);
        assert!(data.is_followable);
        assert!(data.issues.is_empty());
    }

    #[test]
    fn test_noindex_meta() {
        let data = check(r#"<meta name="ROBOTS" content="NoIndex, follow">"#, None);
        assert!(!data.is_indexable);
        assert!(data.is_followable);
        assert_eq!(data.meta_tags[0].directives, vec!["noindex", "follow"]);
    }

    #[test]
    fn test_none_blocks_both() {
        let data = check(r#"<meta name="googlebot" content="none">"#, None);
        assert!(!data.is_indexable);
        assert!(!data.is_followable);
    }

    #[test]
    fn test_header_directives() {
        let data = check("<p>hi</p>", Some("googlebot: noindex"));
        assert_eq!(data.header_directives, vec!["noindex"]);
        assert!(!data.is_indexable);
        assert!(data.issues.iter().any(|i| i.message.contains("X-Robots-Tag")));
    }

    #[test]
    fn test_parameterized_directive_kept() {
        assert_eq!(
            parse_directives("max-snippet:50, noarchive"),
            vec!["max-snippet:50", "noarchive"]
        );
    }

    #[test]
    fn test_conflicting_directives() {
        let data = check(r#"<meta name="robots" content="index, noindex">"#, None);
        assert!(data.issues.iter().any(|i| i.message.contains("conflicting")));
    }

    #[test]
    fn test_other_meta_ignored() {
        let data = check(r#"<meta name="description" content="noindex">"#, None);
        assert!(data.meta_tags.is_empty());
        assert!(data.is_indexable);
    }
}
