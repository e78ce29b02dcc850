//! Meta title and meta description checks.
//!
//! Both are measured in pixels against the SERP display limits and, as a
//! separate guardrail, in characters.

use crate::error::require;
use crate::parsers::text::find_keyword_spans;
use crate::pixel::{DisplayLimits, PixelMeasurement, SERP_LIMITS, measure};
use crate::results::{Issue, ToolResult, no_errors};
use serde::{Deserialize, Serialize};

pub const MIN_TITLE_CHARS: usize = 30;
pub const MIN_DESCRIPTION_CHARS: usize = 70;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaTitleInput {
    pub title: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaDescriptionInput {
    pub description: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Where a focus keyword was found
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordPresence {
    pub keyword: String,
    pub found: bool,
    pub occurrences: usize,
    /// Character offset of the first occurrence
    pub position: Option<usize>,
    /// First occurrence starts before the mobile cut-off
    pub visible_on_mobile: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaCheckResult {
    pub is_valid: bool,
    #[serde(flatten)]
    pub measurement: PixelMeasurement,
    pub min_characters: usize,
    pub max_characters: usize,
    pub is_too_short: bool,
    pub is_too_long: bool,
    pub keyword: Option<KeywordPresence>,
    pub issues: Vec<Issue>,
}

/// Which element is being checked
#[derive(Debug, Clone, Copy)]
enum MetaKind {
    Title,
    Description,
}

impl MetaKind {
    fn label(self) -> &'static str {
        match self {
            MetaKind::Title => "Title",
            MetaKind::Description => "Description",
        }
    }

    fn limits(self) -> &'static DisplayLimits {
        match self {
            MetaKind::Title => &SERP_LIMITS.title,
            MetaKind::Description => &SERP_LIMITS.description,
        }
    }

    fn min_chars(self) -> usize {
        match self {
            MetaKind::Title => MIN_TITLE_CHARS,
            MetaKind::Description => MIN_DESCRIPTION_CHARS,
        }
    }
}

pub fn check_meta_title(input: &MetaTitleInput) -> ToolResult<MetaCheckResult> {
    ToolResult::run(|| {
        require(&input.title, "Title")?;
        Ok(check_meta(MetaKind::Title, input.title.trim(), input.keyword.as_deref()))
    })
}

pub fn check_meta_description(input: &MetaDescriptionInput) -> ToolResult<MetaCheckResult> {
    ToolResult::run(|| {
        require(&input.description, "Description")?;
        Ok(check_meta(
            MetaKind::Description,
            input.description.trim(),
            input.keyword.as_deref(),
        ))
    })
}

fn check_meta(kind: MetaKind, text: &str, keyword: Option<&str>) -> MetaCheckResult {
    let limits = kind.limits();
    let measurement = measure(text, limits);
    let label = kind.label();
    let mut issues = Vec::new();

    let chars = measurement.character_count;
    let is_too_short = chars < kind.min_chars();
    let is_too_long = chars > limits.max_chars;

    if measurement.is_truncated {
        issues.push(Issue::error(format!(
            "{} is {:.0}px wide and will be truncated at {:.0}px on desktop",
            label, measurement.pixel_width, limits.desktop
        )));
    } else if measurement.pixel_width > limits.mobile {
        issues.push(Issue::warning(format!(
            "{} fits on desktop but will be truncated at {:.0}px on mobile",
            label, limits.mobile
        )));
    }

    if is_too_long {
        issues.push(Issue::warning(format!(
            "{} has {} characters; keep it under {}",
            label, chars, limits.max_chars
        )));
    } else if is_too_short {
        issues.push(Issue::warning(format!(
            "{} has {} characters; aim for at least {}",
            label,
            chars,
            kind.min_chars()
        )));
    }

    let keyword = keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| keyword_presence(text, k, &measurement.mobile_preview));

    if let Some(presence) = &keyword {
        if !presence.found {
            issues.push(Issue::warning(format!(
                "{} does not contain the keyword \"{}\"",
                label, presence.keyword
            )));
        } else if !presence.visible_on_mobile {
            issues.push(Issue::info(format!(
                "Keyword \"{}\" appears after the mobile truncation point",
                presence.keyword
            )));
        }
    }

    ::log::debug!(
        "{} check: {:.2}px / {} chars, truncated={}",
        label,
        measurement.pixel_width,
        chars,
        measurement.is_truncated
    );

    MetaCheckResult {
        is_valid: no_errors(&issues),
        measurement,
        min_characters: kind.min_chars(),
        max_characters: limits.max_chars,
        is_too_short,
        is_too_long,
        keyword,
        issues,
    }
}

fn keyword_presence(text: &str, keyword: &str, mobile_preview: &str) -> KeywordPresence {
    let spans = find_keyword_spans(text, keyword);
    let first = spans.first();

    let visible_chars = mobile_preview
        .strip_suffix(crate::pixel::ELLIPSIS)
        .unwrap_or(mobile_preview)
        .chars()
        .count();

    KeywordPresence {
        keyword: keyword.to_string(),
        found: first.is_some(),
        occurrences: spans.len(),
        position: first.map(|span| span.start),
        visible_on_mobile: first.is_some_and(|span| span.end <= visible_chars),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::calculate_title_pixel_width;

    fn title(text: &str) -> MetaCheckResult {
        check_meta_title(&MetaTitleInput {
            title: text.to_string(),
            keyword: None,
        })
        .data
        .unwrap()
    }

    #[test]
    fn test_single_character_title() {
        let data = title("A");
        assert!(!data.measurement.is_truncated);
        assert_eq!(data.measurement.pixel_width, calculate_title_pixel_width("A"));
        assert_eq!(data.measurement.pixel_width, 13.34);
        assert!(data.is_too_short);
        assert!(data.is_valid);
    }

    #[test]
    fn test_wide_title_truncated() {
        let data = title(&"W".repeat(40));
        assert!(data.measurement.is_truncated);
        assert!(!data.is_valid);
        assert!(data.measurement.desktop_preview.ends_with("..."));
        assert!(!data.is_too_long);
    }

    #[test]
    fn test_narrow_title_over_char_limit_not_truncated() {
        let data = title(&"i".repeat(65));
        assert!(!data.measurement.is_truncated);
        assert!(data.is_too_long);
        assert!(data.is_valid);
    }

    #[test]
    fn test_keyword_presence() {
        let data = check_meta_title(&MetaTitleInput {
            title: "Best Running Shoes for Trail Runners in 2024".to_string(),
            keyword: Some("running shoes".to_string()),
        })
        .data
        .unwrap();
        let keyword = data.keyword.unwrap();
        assert!(keyword.found);
        assert_eq!(keyword.position, Some(5));
        assert!(keyword.visible_on_mobile);
    }

    #[test]
    fn test_keyword_position_skips_longer_words() {
        let data = check_meta_title(&MetaTitleInput {
            title: "Trail Running Guide: How To Run Faster On Hills".to_string(),
            keyword: Some("run".to_string()),
        })
        .data
        .unwrap();
        let keyword = data.keyword.unwrap();
        assert_eq!(keyword.occurrences, 1);
        assert_eq!(keyword.position, Some(28));
        assert!(keyword.visible_on_mobile);
    }

    #[test]
    fn test_keyword_position_counts_chars() {
        let data = check_meta_title(&MetaTitleInput {
            title: "Wäre Straße Führer: Run".to_string(),
            keyword: Some("RUN".to_string()),
        })
        .data
        .unwrap();
        assert_eq!(data.keyword.unwrap().position, Some(20));
    }

    #[test]
    fn test_missing_keyword_warns() {
        let data = check_meta_description(&MetaDescriptionInput {
            description: "A description that talks about something else entirely, \
                          long enough to pass the minimum length check."
                .to_string(),
            keyword: Some("shoes".to_string()),
        })
        .data
        .unwrap();
        assert!(!data.keyword.as_ref().unwrap().found);
        assert!(data.issues.iter().any(|i| i.message.contains("does not contain")));
    }

    #[test]
    fn test_empty_title_fails() {
        let result = check_meta_title(&MetaTitleInput::default());
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_serialized_shape() {
        let result = check_meta_title(&MetaTitleInput {
            title: "Hello".to_string(),
            keyword: None,
        });
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["data"]["pixelWidth"].is_number());
        assert_eq!(json["data"]["isTruncated"], false);
        assert_eq!(json["data"]["desktopPreview"], "Hello");
    }
}
