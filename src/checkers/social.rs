use crate::error::require;
use crate::parsers::text::{
    count_emojis, count_graphemes, count_words, extract_hashtags, extract_mentions, extract_urls,
    is_emoji,
};
use crate::results::{Issue, ToolResult};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Length every link counts as in a tweet, whatever its real length
pub const TWITTER_URL_WEIGHT: usize = 23;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    #[default]
    Twitter,
    InstagramCaption,
    InstagramBio,
    #[serde(rename = "youtube-title")]
    #[value(name = "youtube-title")]
    YouTubeTitle,
    #[serde(rename = "youtube-description")]
    #[value(name = "youtube-description")]
    YouTubeDescription,
}

/// Fixed limits of one platform field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLimits {
    pub max_characters: usize,
    /// Hard cap on hashtags, if the platform has one
    pub max_hashtags: Option<usize>,
    /// Characters shown before the text is cut off in feeds or results
    pub visible_characters: Option<usize>,
}

const TWITTER: PlatformLimits = PlatformLimits {
    max_characters: 280,
    max_hashtags: None,
    visible_characters: None,
};

const INSTAGRAM_CAPTION: PlatformLimits = PlatformLimits {
    max_characters: 2200,
    max_hashtags: Some(30),
    visible_characters: Some(125),
};

const INSTAGRAM_BIO: PlatformLimits = PlatformLimits {
    max_characters: 150,
    max_hashtags: None,
    visible_characters: None,
};

const YOUTUBE_TITLE: PlatformLimits = PlatformLimits {
    max_characters: 100,
    max_hashtags: None,
    visible_characters: Some(70),
};

/// YouTube ignores every hashtag on a video with more than 15
const YOUTUBE_DESCRIPTION: PlatformLimits = PlatformLimits {
    max_characters: 5000,
    max_hashtags: Some(15),
    visible_characters: Some(157),
};

impl Platform {
    pub fn limits(&self) -> &'static PlatformLimits {
        match self {
            Platform::Twitter => &TWITTER,
            Platform::InstagramCaption => &INSTAGRAM_CAPTION,
            Platform::InstagramBio => &INSTAGRAM_BIO,
            Platform::YouTubeTitle => &YOUTUBE_TITLE,
            Platform::YouTubeDescription => &YOUTUBE_DESCRIPTION,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Twitter => "Tweet",
            Platform::InstagramCaption => "Instagram caption",
            Platform::InstagramBio => "Instagram bio",
            Platform::YouTubeTitle => "YouTube title",
            Platform::YouTubeDescription => "YouTube description",
        }
    }

    /// Length of `text` as the platform counts it
    pub fn count(&self, text: &str) -> usize {
        match self {
            Platform::Twitter => twitter_length(text),
            _ => count_graphemes(text),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialTextInput {
    pub text: String,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialTextResult {
    pub platform: Platform,
    pub character_count: usize,
    pub limit: usize,
    /// Negative when over the limit
    pub remaining: i64,
    pub is_over_limit: bool,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub urls: Vec<String>,
    pub emoji_count: usize,
    pub word_count: usize,
    pub issues: Vec<Issue>,
}

/// Weight of one code point in a tweet: Latin and common punctuation count
/// once, everything else (CJK, emoji) twice
fn twitter_weight(c: char) -> usize {
    match c as u32 {
        0..=4351 | 8192..=8205 | 8208..=8223 | 8242..=8247 => 1,
        _ => 2,
    }
}

/// Weight of one grapheme cluster: an emoji counts 2 however many code
/// points it is built from
fn cluster_weight(grapheme: &str) -> usize {
    if is_emoji(grapheme) {
        2
    } else {
        grapheme.chars().map(twitter_weight).sum()
    }
}

/// Tweet length: links count as [`TWITTER_URL_WEIGHT`], other text by
/// cluster weight
pub fn twitter_length(text: &str) -> usize {
    let urls = extract_urls(text);
    let mut rest = text.to_string();
    for url in &urls {
        rest = rest.replacen(url.as_str(), "", 1);
    }
    rest.graphemes(true).map(cluster_weight).sum::<usize>() + urls.len() * TWITTER_URL_WEIGHT
}

/// Count `text` against the limits of `platform`
pub fn check_social_text(input: &SocialTextInput) -> ToolResult<SocialTextResult> {
    ToolResult::run(|| {
        require(&input.text, "Text")?;
        Ok(check(&input.text, input.platform))
    })
}

fn check(text: &str, platform: Platform) -> SocialTextResult {
    let limits = platform.limits();
    let character_count = platform.count(text);
    let remaining = limits.max_characters as i64 - character_count as i64;
    let is_over_limit = remaining < 0;

    let hashtags = extract_hashtags(text);
    let mentions = extract_mentions(text);
    let urls = extract_urls(text);

    let mut issues = Vec::new();
    if is_over_limit {
        issues.push(Issue::error(format!(
            "{} is {} characters over the {} limit",
            platform.label(),
            -remaining,
            limits.max_characters
        )));
    }
    if let Some(max) = limits.max_hashtags {
        if hashtags.len() > max {
            issues.push(Issue::error(format!(
                "{} hashtags; {} allows at most {}",
                hashtags.len(),
                platform.label(),
                max
            )));
        }
    }
    if let Some(visible) = limits.visible_characters {
        if !is_over_limit && character_count > visible {
            issues.push(Issue::info(format!(
                "Only the first {} characters are shown before the text is cut off",
                visible
            )));
        }
    }
    if platform == Platform::Twitter && hashtags.len() > 2 {
        issues.push(Issue::info("More than two hashtags tends to reduce engagement"));
    }
    if matches!(platform, Platform::InstagramBio | Platform::YouTubeTitle) && !urls.is_empty() {
        issues.push(Issue::warning(format!(
            "Links in a {} are not clickable",
            platform.label()
        )));
    }

    ::log::debug!(
        "{}: {} of {} characters",
        platform.label(),
        character_count,
        limits.max_characters
    );

    SocialTextResult {
        platform,
        character_count,
        limit: limits.max_characters,
        remaining,
        is_over_limit,
        emoji_count: count_emojis(text),
        word_count: count_words(text),
        hashtags,
        mentions,
        urls,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, platform: Platform) -> SocialTextResult {
        check_social_text(&SocialTextInput {
            text: text.to_string(),
            platform,
        })
        .data
        .unwrap()
    }

    #[test]
    fn test_twitter_weighting() {
        assert_eq!(twitter_length("hello"), 5);
        assert_eq!(twitter_length("日本"), 4);
        assert_eq!(twitter_length("ok 🚀"), 5);
        assert_eq!(
            twitter_length("read https://example.com/a/very/long/path/that/goes/on"),
            5 + TWITTER_URL_WEIGHT
        );
    }

    #[test]
    fn test_emoji_sequences_count_once() {
        // Thumbs up with a skin tone, and a ZWJ family
        let thumbs = "\u{1F44D}\u{1F3FD}";
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(twitter_length(thumbs), 2);
        assert_eq!(twitter_length(family), 2);
        assert_eq!(Platform::InstagramCaption.count(thumbs), 1);
        assert_eq!(Platform::YouTubeTitle.count(&format!("Hi {}", family)), 4);
        assert_eq!(run(family, Platform::InstagramBio).emoji_count, 1);
    }

    #[test]
    fn test_tweet_counts() {
        let data = run("Shipping #rustlang tips with @ferris https://rust-lang.org 🚀", Platform::Twitter);
        assert_eq!(data.hashtags, vec!["#rustlang"]);
        assert_eq!(data.mentions, vec!["@ferris"]);
        assert_eq!(data.urls, vec!["https://rust-lang.org"]);
        assert_eq!(data.emoji_count, 1);
        assert_eq!(data.limit, 280);
        assert_eq!(data.remaining, 280 - data.character_count as i64);
        assert!(!data.is_over_limit);
    }

    #[test]
    fn test_over_limit() {
        let data = run(&"a".repeat(151), Platform::InstagramBio);
        assert!(data.is_over_limit);
        assert_eq!(data.remaining, -1);
        assert!(data.issues.iter().any(|i| i.message.contains("1 characters over")));
    }

    #[test]
    fn test_instagram_hashtag_cap() {
        let tags: Vec<String> = (0..31).map(|i| format!("#tag{}", i)).collect();
        let data = run(&tags.join(" "), Platform::InstagramCaption);
        assert_eq!(data.hashtags.len(), 31);
        assert!(data.issues.iter().any(|i| i.message.contains("at most 30")));
    }

    #[test]
    fn test_youtube_title_visible_part() {
        let data = run(&"word ".repeat(16), Platform::YouTubeTitle);
        assert_eq!(data.character_count, 80);
        assert!(!data.is_over_limit);
        assert!(data.issues.iter().any(|i| i.message.contains("first 70")));
    }

    #[test]
    fn test_platform_names() {
        let platform: Platform = serde_json::from_str("\"youtube-description\"").unwrap();
        assert_eq!(platform, Platform::YouTubeDescription);
        let platform: Platform = serde_json::from_str("\"instagram-caption\"").unwrap();
        assert_eq!(platform.limits().max_characters, 2200);
    }

    #[test]
    fn test_empty_text_fails() {
        assert!(!check_social_text(&SocialTextInput::default()).success);
    }
}
