use crate::error::ToolError;
use crate::parsers::ExtractorKind;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Settings for the keyword density analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensityConfig {
    /// Number of entries kept per n-gram list
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Whether single stop words are counted as keywords
    #[serde(default)]
    pub include_stop_words: bool,

    /// Shorter single words are ignored
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    /// Density (percent) above which a keyword counts as stuffed
    #[serde(default = "default_stuffing_threshold")]
    pub stuffing_threshold: f64,

    /// Target keyword density (percent) below which it is reported as low
    #[serde(default = "default_low_density_threshold")]
    pub low_density_threshold: f64,
}

/// Settings for the slug optimizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugConfig {
    /// Maximum slug length in characters
    #[serde(default = "default_slug_max_length")]
    pub max_length: usize,

    /// Placed between words
    #[serde(default = "default_slug_separator")]
    pub separator: String,

    #[serde(default = "default_true")]
    pub remove_stop_words: bool,
}

/// Settings for text statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Silent reading speed
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// Reading-aloud speed
    #[serde(default = "default_speaking_words_per_minute")]
    pub speaking_words_per_minute: u32,
}

/// Configuration shared by all tools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub keyword_density: KeywordDensityConfig,

    #[serde(default)]
    pub slug: SlugConfig,

    #[serde(default)]
    pub text: TextConfig,

    /// HTML extractor used by the HTML checkers
    #[serde(default)]
    pub extractor: ExtractorKind,
}

impl ToolConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ToolError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(contents: &str) -> Result<Self, ToolError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ToolError> {
        if self.slug.max_length == 0 {
            return Err(ToolError::InvalidInput(
                "slug.max_length must be greater than 0".to_string(),
            ));
        }
        if self.text.words_per_minute == 0 || self.text.speaking_words_per_minute == 0 {
            return Err(ToolError::InvalidInput(
                "text speeds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for KeywordDensityConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            include_stop_words: false,
            min_word_length: default_min_word_length(),
            stuffing_threshold: default_stuffing_threshold(),
            low_density_threshold: default_low_density_threshold(),
        }
    }
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            max_length: default_slug_max_length(),
            separator: default_slug_separator(),
            remove_stop_words: true,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
            speaking_words_per_minute: default_speaking_words_per_minute(),
        }
    }
}

fn default_top_n() -> usize {
    20
}

fn default_min_word_length() -> usize {
    3
}

fn default_stuffing_threshold() -> f64 {
    3.0
}

fn default_low_density_threshold() -> f64 {
    0.5
}

fn default_slug_max_length() -> usize {
    60
}

fn default_slug_separator() -> String {
    "-".to_string()
}

fn default_true() -> bool {
    true
}

/// Average adult silent reading speed
fn default_words_per_minute() -> u32 {
    200
}

fn default_speaking_words_per_minute() -> u32 {
    130
}
