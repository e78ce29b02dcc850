//! Single entry point over every checker, used by the CLI.

use crate::checkers::canonical::{CanonicalInput, check_canonical};
use crate::checkers::headings::{HeadingInput, analyze_headings};
use crate::checkers::keyword_density::{KeywordDensityInput, analyze_keyword_density};
use crate::checkers::meta::{
    MetaDescriptionInput, MetaTitleInput, check_meta_description, check_meta_title,
};
use crate::checkers::noindex::{NoindexInput, check_noindex};
use crate::checkers::robots::{
    RobotsPathInput, RobotsTxtInput, check_robots_path, validate_robots_txt,
};
use crate::checkers::serp::{SerpPreviewInput, generate_serp_preview};
use crate::checkers::sitemap::{SitemapInput, analyze_sitemap};
use crate::checkers::slug::{SlugInput, optimize_slug};
use crate::checkers::social::{Platform, SocialTextInput, check_social_text};
use crate::checkers::text_stats::{
    CompareTextsInput, TextStatsInput, analyze_text, compare_texts,
};
use crate::config::ToolConfig;
use crate::results::ToolResult;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{Value, json};

/// Every tool the crate provides
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Tool {
    /// Canonical link check (HTML + --url)
    Canonical,
    /// Heading outline and hierarchy issues (HTML)
    Headings,
    /// Word and phrase frequencies (text or --html, optional --keyword)
    KeywordDensity,
    /// Meta title length and pixel width (text, optional --keyword)
    MetaTitle,
    /// Meta description length and pixel width (text, optional --keyword)
    MetaDescription,
    /// Robots meta tags and X-Robots-Tag (HTML)
    Noindex,
    /// robots.txt validation
    RobotsTxt,
    /// Whether --user-agent may fetch --path under a robots.txt
    RobotsTest,
    /// Sitemap or sitemap index analysis (XML)
    Sitemap,
    /// URL slug from a title or phrase
    Slug,
    /// Search result preview (title as input, --description, --url)
    SerpPreview,
    /// Character counts against a social platform's limits (--platform)
    Social,
    /// Word, sentence and reading-time statistics
    TextStats,
    /// Similarity between the input and --compare
    TextCompare,
}

/// Everything a tool may read. Which fields are used depends on the tool.
#[derive(Debug, Clone, Default)]
pub struct ToolRequest {
    /// Main input: HTML, text, XML or robots.txt content
    pub input: String,
    pub url: Option<String>,
    pub keyword: Option<String>,
    pub description: Option<String>,
    pub platform: Platform,
    /// Second text for comparisons
    pub compare: Option<String>,
    pub user_agent: Option<String>,
    pub path: Option<String>,
    pub x_robots_tag: Option<String>,
    /// Treat `input` as HTML where a tool accepts both
    pub is_html: bool,
}

impl Tool {
    /// Run the tool and return its serialized result envelope
    pub fn run(&self, request: &ToolRequest, config: &ToolConfig) -> Value {
        let extractor = config.extractor;
        let value = match self {
            Tool::Canonical => envelope(check_canonical(&CanonicalInput {
                html: request.input.clone(),
                page_url: request.url.clone().unwrap_or_default(),
                extractor,
            })),
            Tool::Headings => envelope(analyze_headings(&HeadingInput {
                html: request.input.clone(),
                extractor,
            })),
            Tool::KeywordDensity => envelope(analyze_keyword_density(&KeywordDensityInput {
                content: request.input.clone(),
                is_html: request.is_html,
                target_keyword: request.keyword.clone(),
                options: config.keyword_density.clone(),
                extractor,
            })),
            Tool::MetaTitle => envelope(check_meta_title(&MetaTitleInput {
                title: request.input.clone(),
                keyword: request.keyword.clone(),
            })),
            Tool::MetaDescription => envelope(check_meta_description(&MetaDescriptionInput {
                description: request.input.clone(),
                keyword: request.keyword.clone(),
            })),
            Tool::Noindex => envelope(check_noindex(&NoindexInput {
                html: request.input.clone(),
                x_robots_tag: request.x_robots_tag.clone(),
                extractor,
            })),
            Tool::RobotsTxt => envelope(validate_robots_txt(&RobotsTxtInput {
                content: request.input.clone(),
            })),
            Tool::RobotsTest => envelope(check_robots_path(&RobotsPathInput {
                content: request.input.clone(),
                user_agent: request.user_agent.clone().unwrap_or_else(|| "*".to_string()),
                path: request.path.clone().unwrap_or_default(),
            })),
            Tool::Sitemap => envelope(analyze_sitemap(&SitemapInput {
                content: request.input.clone(),
            })),
            Tool::Slug => envelope(optimize_slug(&SlugInput {
                text: request.input.clone(),
                options: config.slug.clone(),
            })),
            Tool::SerpPreview => envelope(generate_serp_preview(&SerpPreviewInput {
                title: request.input.clone(),
                description: request.description.clone().unwrap_or_default(),
                url: request.url.clone().unwrap_or_default(),
            })),
            Tool::Social => envelope(check_social_text(&SocialTextInput {
                text: request.input.clone(),
                platform: request.platform,
            })),
            Tool::TextStats => envelope(analyze_text(&TextStatsInput {
                text: request.input.clone(),
                options: config.text.clone(),
            })),
            Tool::TextCompare => envelope(compare_texts(&CompareTextsInput {
                original: request.input.clone(),
                modified: request.compare.clone().unwrap_or_default(),
            })),
        };

        ::log::info!(
            "Ran {:?}: success={} in {}ms",
            self,
            value["success"],
            value["processingTime"]
        );
        value
    }
}

fn envelope<T: Serialize>(result: ToolResult<T>) -> Value {
    let processing_time = result.processing_time;
    serde_json::to_value(&result).unwrap_or_else(|e| {
        ::log::error!("Failed to serialize result: {}", e);
        json!({
            "success": false,
            "error": format!("JSON error: {}", e),
            "processingTime": processing_time,
        })
    })
}

/// True when the envelope reports success
pub fn succeeded(value: &Value) -> bool {
    value["success"].as_bool().unwrap_or(false)
}
