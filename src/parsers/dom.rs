use crate::parsers::html::collapse_whitespace;
use crate::parsers::{HeadingItem, HtmlExtractor, HtmlTag};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// [`HtmlExtractor`] backed by a full `scraper` DOM parse.
///
/// Slower than [`RegexExtractor`](crate::parsers::RegexExtractor) but follows
/// the HTML5 tree-building rules, so implied and misnested tags are resolved
/// the way a browser would.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomExtractor;

impl HtmlExtractor for DomExtractor {
    fn extract_tags(&self, html: &str, tag_name: &str) -> Vec<HtmlTag> {
        let selector = match Selector::parse(tag_name.trim()) {
            Ok(selector) => selector,
            Err(e) => {
                ::log::warn!("Cannot build selector for '{}': {:?}", tag_name, e);
                return Vec::new();
            }
        };

        let doc = Html::parse_document(html);
        let tags: Vec<HtmlTag> = doc
            .select(&selector)
            .map(|element| HtmlTag {
                attributes: element
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                    .collect(),
            })
            .collect();

        ::log::debug!("DOM extractor found {} <{}> tags", tags.len(), tag_name);
        tags
    }

    fn extract_headings(&self, html: &str) -> Vec<HeadingItem> {
        let doc = Html::parse_document(html);
        doc.select(&HEADING_SELECTOR)
            .filter_map(|element| {
                let level = element.value().name().strip_prefix('h')?.parse::<u8>().ok()?;
                let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
                Some(HeadingItem { level, text })
            })
            .collect()
    }

    fn strip_html(&self, html: &str) -> String {
        let doc = Html::parse_document(html);
        let mut parts: Vec<&str> = Vec::new();

        for node in doc.tree.root().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|element| HIDDEN_ELEMENTS.contains(&element.name()))
                    .unwrap_or(false)
            });
            if !hidden {
                parts.push(text);
            }
        }

        collapse_whitespace(&parts.join(" "))
    }

    fn extract_title(&self, html: &str) -> Option<String> {
        let doc = Html::parse_document(html);
        doc.select(&TITLE_SELECTOR)
            .next()
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .filter(|title| !title.is_empty())
    }
}
