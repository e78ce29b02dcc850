//! String-scanning HTML extractor.
//!
//! This is not an HTML parser. It finds opening tags and a handful of element
//! bodies with regular expressions, which is enough for the facts SEO checks
//! need and tolerates markup a strict parser would reject.

use crate::parsers::{HeadingItem, HtmlExtractor, HtmlTag};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

static HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (1..=6)
        .map(|level| Regex::new(&format!(r"(?is)<h{level}\b[^>]*>(.*?)</h{level}\s*>")).unwrap())
        .collect()
});

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap());

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static INVISIBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>|<template\b.*?</template\s*>",
    )
    .unwrap()
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").unwrap());

/// Regex-backed [`HtmlExtractor`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl HtmlExtractor for RegexExtractor {
    fn extract_tags(&self, html: &str, tag_name: &str) -> Vec<HtmlTag> {
        let pattern = format!(
            r#"(?is)<{}\b((?:"[^"]*"|'[^']*'|[^>])*)>"#,
            regex::escape(tag_name.trim())
        );
        let tag_regex = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                ::log::warn!("Cannot build tag pattern for '{}': {}", tag_name, e);
                return Vec::new();
            }
        };

        let html = COMMENT.replace_all(html, " ");
        let tags: Vec<HtmlTag> = tag_regex
            .captures_iter(&html)
            .map(|caps| HtmlTag {
                attributes: parse_attributes(caps.get(1).map_or("", |m| m.as_str())),
            })
            .collect();

        ::log::debug!("Found {} <{}> tags", tags.len(), tag_name);
        tags
    }

    fn extract_headings(&self, html: &str) -> Vec<HeadingItem> {
        let html = COMMENT.replace_all(html, " ");
        let mut found: Vec<(usize, HeadingItem)> = Vec::new();
        for (idx, regex) in HEADINGS.iter().enumerate() {
            for caps in regex.captures_iter(&html) {
                let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                found.push((
                    whole.start(),
                    HeadingItem {
                        level: idx as u8 + 1,
                        text: inner_text(body.as_str()),
                    },
                ));
            }
        }
        found.sort_by_key(|(start, _)| *start);

        ::log::debug!("Found {} headings", found.len());
        found.into_iter().map(|(_, heading)| heading).collect()
    }

    fn strip_html(&self, html: &str) -> String {
        let without_comments = COMMENT.replace_all(html, " ");
        let visible = INVISIBLE.replace_all(&without_comments, " ");
        inner_text(&visible)
    }

    fn extract_title(&self, html: &str) -> Option<String> {
        TITLE
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| inner_text(m.as_str()))
            .filter(|title| !title.is_empty())
    }
}

/// Parse the attribute section of an opening tag
pub fn parse_attributes(section: &str) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    for caps in ATTRIBUTE.captures_iter(section) {
        let Some(name) = caps.get(1) else {
            continue;
        };
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or(String::new(), |m| decode_entities(m.as_str()));
        // Later duplicates are ignored, as browsers do
        attributes
            .entry(name.as_str().to_ascii_lowercase())
            .or_insert(value);
    }
    attributes
}

/// Remove tags, decode entities, collapse whitespace
fn inner_text(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, " ");
    collapse_whitespace(&decode_entities(&without_tags))
}

/// Collapse runs of whitespace to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode numeric references and the common named entities.
/// Unknown names are left as written.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            decode_entity(body).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let decoded = match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "copy" => "©",
        "reg" => "®",
        "trade" => "™",
        "hellip" => "…",
        "mdash" => "—",
        "ndash" => "–",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        "raquo" => "»",
        "laquo" => "«",
        "middot" => "·",
        _ => return None,
    };
    Some(decoded.to_string())
}

// Convenience wrappers over the default extractor

pub fn extract_tags(html: &str, tag_name: &str) -> Vec<HtmlTag> {
    RegexExtractor.extract_tags(html, tag_name)
}

pub fn extract_headings(html: &str) -> Vec<HeadingItem> {
    RegexExtractor.extract_headings(html)
}

pub fn extract_canonical(html: &str) -> Option<String> {
    RegexExtractor.extract_canonical(html)
}

pub fn get_meta_content(html: &str, name: &str) -> Option<String> {
    RegexExtractor.get_meta_content(html, name)
}

pub fn strip_html(html: &str) -> String {
    RegexExtractor.strip_html(html)
}

pub fn extract_title(html: &str) -> Option<String> {
    RegexExtractor.extract_title(html)
}
