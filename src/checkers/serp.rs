use crate::error::require;
use crate::pixel::{PixelMeasurement, SERP_LIMITS, measure};
use crate::results::{Issue, ToolResult};
use crate::utils::title_case;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use url::Url;

/// Separator Google uses between breadcrumb segments
pub const BREADCRUMB_SEPARATOR: &str = " › ";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerpPreviewInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

/// How the page address is shown above the title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayUrl {
    /// `www.example.com › Blog › My Post`
    pub breadcrumb: String,
    pub host: String,
    pub site_name: String,
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerpPreview {
    pub title: PixelMeasurement,
    pub description: PixelMeasurement,
    pub display_url: Option<DisplayUrl>,
    pub issues: Vec<Issue>,
}

/// Percent-decode a path segment, keeping the raw text if it is not UTF-8
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string())
}

/// Turn a path segment into breadcrumb text: decoded, extension dropped,
/// `-`/`_` read as spaces, each word capitalized
pub fn format_segment(segment: &str) -> String {
    let decoded = decode_segment(segment);
    let stem = match decoded.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() <= 4 => stem.to_string(),
        _ => decoded,
    };
    title_case(&stem.replace(['-', '_', '+'], " "))
}

/// Format `url` the way a result page shows it
pub fn format_display_url(url: &Url) -> DisplayUrl {
    let host = url.host_str().unwrap_or_default().to_string();
    let site_name = host.strip_prefix("www.").unwrap_or(&host).to_string();

    let segments: Vec<String> = url
        .path_segments()
        .map(|parts| {
            parts
                .filter(|part| !part.is_empty())
                .map(format_segment)
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let mut breadcrumb = host.clone();
    for segment in &segments {
        breadcrumb.push_str(BREADCRUMB_SEPARATOR);
        breadcrumb.push_str(segment);
    }

    DisplayUrl {
        breadcrumb,
        host,
        site_name,
        segments,
    }
}

/// Desktop and mobile preview of a search result
pub fn generate_serp_preview(input: &SerpPreviewInput) -> ToolResult<SerpPreview> {
    ToolResult::run(|| {
        require(&input.title, "Title")?;
        Ok(build_preview(input))
    })
}

fn build_preview(input: &SerpPreviewInput) -> SerpPreview {
    let mut issues = Vec::new();

    let title = measure(input.title.trim(), &SERP_LIMITS.title);
    if title.is_truncated {
        issues.push(Issue::warning("Title will be truncated on desktop"));
    } else if title.mobile_preview != title.text {
        issues.push(Issue::info("Title will be truncated on mobile"));
    }

    let description = measure(input.description.trim(), &SERP_LIMITS.description);
    if description.text.is_empty() {
        issues.push(Issue::warning(
            "No description; search engines will pick a snippet from the page",
        ));
    } else if description.is_truncated {
        issues.push(Issue::warning("Description will be truncated on desktop"));
    } else if description.mobile_preview != description.text {
        issues.push(Issue::info("Description will be truncated on mobile"));
    }

    let url = input.url.trim();
    let display_url = if url.is_empty() {
        None
    } else {
        match Url::parse(url) {
            Ok(parsed) => Some(format_display_url(&parsed)),
            Err(e) => {
                issues.push(Issue::warning(format!("URL '{}' cannot be parsed: {}", url, e)));
                // Shown as typed
                Some(DisplayUrl {
                    breadcrumb: url.to_string(),
                    host: String::new(),
                    site_name: String::new(),
                    segments: Vec::new(),
                })
            }
        }
    };

    ::log::debug!(
        "SERP preview: title {:.0}px, description {:.0}px",
        title.pixel_width,
        description.pixel_width
    );

    SerpPreview {
        title,
        description,
        display_url,
        issues,
    }
}
