pub mod dom;
pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use dom::DomExtractor;
pub use html::RegexExtractor;

/// An opening tag and its attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlTag {
    /// Attribute names are lower-cased; valueless attributes map to ""
    pub attributes: BTreeMap<String, String>,
}

impl HtmlTag {
    /// Attribute value by (lower-case) name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A heading element in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingItem {
    /// 1 through 6
    pub level: u8,
    pub text: String,
}

/// Pulls a fixed set of structural facts out of HTML.
///
/// Implementations never fail: malformed or partial markup yields empty
/// results rather than errors.
pub trait HtmlExtractor {
    /// Opening tags named `tag_name`, self-closing or not
    fn extract_tags(&self, html: &str, tag_name: &str) -> Vec<HtmlTag>;

    /// `<h1>`..`<h6>` in document order with markup stripped
    fn extract_headings(&self, html: &str) -> Vec<HeadingItem>;

    /// `href` of the first `<link rel="canonical">`
    fn extract_canonical(&self, html: &str) -> Option<String> {
        self.extract_tags(html, "link")
            .into_iter()
            .find(is_canonical_link)
            .and_then(|tag| tag.attributes.get("href").cloned())
    }

    /// `content` of the first `<meta>` whose name (or property) is `name`
    fn get_meta_content(&self, html: &str, name: &str) -> Option<String> {
        self.extract_tags(html, "meta")
            .into_iter()
            .find(|tag| meta_name_matches(tag, name))
            .and_then(|tag| tag.attributes.get("content").cloned())
    }

    /// Visible text with tags removed and whitespace collapsed
    fn strip_html(&self, html: &str) -> String;

    /// Trimmed `<title>` text
    fn extract_title(&self, html: &str) -> Option<String>;
}

/// Whether a `<link>` tag's rel token list contains "canonical"
pub fn is_canonical_link(tag: &HtmlTag) -> bool {
    tag.attr("rel")
        .map(|rel| {
            rel.split_whitespace()
                .any(|token| token.eq_ignore_ascii_case("canonical"))
        })
        .unwrap_or(false)
}

/// Whether a `<meta>` tag is named `name` via `name=` or `property=`
pub fn meta_name_matches(tag: &HtmlTag, name: &str) -> bool {
    ["name", "property"].iter().any(|key| {
        tag.attr(key)
            .map(|value| value.trim().eq_ignore_ascii_case(name))
            .unwrap_or(false)
    })
}

/// Which extractor implementation to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// String-scanning extractor
    #[default]
    Regex,
    /// Full DOM parse through `scraper`
    Dom,
}

impl ExtractorKind {
    /// The extractor this kind names
    pub fn extractor(&self) -> &'static dyn HtmlExtractor {
        match self {
            ExtractorKind::Regex => &RegexExtractor,
            ExtractorKind::Dom => &DomExtractor,
        }
    }
}
