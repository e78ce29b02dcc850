use crate::config::KeywordDensityConfig;
use crate::error::require;
use crate::parsers::ExtractorKind;
use crate::parsers::text::{
    calculate_keyword_density, count_keyword_occurrences, count_words, get_ngram_frequency,
    is_stop_word, sorted_frequencies,
};
use crate::results::{Issue, ToolResult};
use crate::utils::round2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Below this many words densities are too noisy to judge
const MIN_CONTENT_WORDS: usize = 300;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDensityInput {
    pub content: String,
    /// Strip tags before counting
    #[serde(default)]
    pub is_html: bool,
    #[serde(default)]
    pub target_keyword: Option<String>,
    #[serde(default)]
    pub options: KeywordDensityConfig,
    #[serde(default)]
    pub extractor: ExtractorKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDensityItem {
    pub keyword: String,
    pub count: usize,
    /// Percent of all words, 0..=100
    pub density: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDensityResult {
    pub total_words: usize,
    pub unique_words: usize,
    pub unigrams: Vec<KeywordDensityItem>,
    pub bigrams: Vec<KeywordDensityItem>,
    pub trigrams: Vec<KeywordDensityItem>,
    pub target: Option<KeywordDensityItem>,
    pub issues: Vec<Issue>,
}

/// Most frequent single words and phrases in `content`
pub fn analyze_keyword_density(input: &KeywordDensityInput) -> ToolResult<KeywordDensityResult> {
    let result = ToolResult::run(|| {
        require(&input.content, "Content")?;
        let text = if input.is_html {
            input.extractor.extractor().strip_html(&input.content)
        } else {
            input.content.clone()
        };
        Ok(analyze(&text, input.target_keyword.as_deref(), &input.options))
    });

    if !input.is_html && looks_like_html(&input.content) {
        result.with_warnings(vec![
            "Content looks like HTML; tags are counted as words unless it is marked as HTML"
                .to_string(),
        ])
    } else {
        result
    }
}

fn looks_like_html(content: &str) -> bool {
    let lower = content.to_ascii_lowercase();
    ["<p", "<div", "<body", "<html", "<h1", "<span"]
        .iter()
        .any(|tag| lower.contains(tag))
}

fn density(count: usize, total_words: usize) -> f64 {
    if total_words == 0 {
        return 0.0;
    }
    round2(count as f64 / total_words as f64 * 100.0).clamp(0.0, 100.0)
}

/// Counted n-grams of `text` that pass the stop-word and length filters
fn top_ngrams(
    text: &str,
    n: usize,
    total_words: usize,
    options: &KeywordDensityConfig,
) -> Vec<KeywordDensityItem> {
    let frequency = get_ngram_frequency(text, n, false);

    sorted_frequencies(&frequency)
        .into_iter()
        .filter(|(phrase, _)| {
            if n == 1 {
                (options.include_stop_words || !is_stop_word(phrase))
                    && phrase.chars().count() >= options.min_word_length
            } else {
                // A phrase that starts or ends on a stop word is not a keyword
                let first = phrase.split(' ').next().unwrap_or_default();
                let last = phrase.rsplit(' ').next().unwrap_or_default();
                !is_stop_word(first) && !is_stop_word(last)
            }
        })
        .take(options.top_n)
        .map(|(keyword, count)| KeywordDensityItem {
            density: density(count, total_words),
            keyword,
            count,
        })
        .collect()
}

fn analyze(
    text: &str,
    target_keyword: Option<&str>,
    options: &KeywordDensityConfig,
) -> KeywordDensityResult {
    let total_words = count_words(text);
    let unique_words = get_ngram_frequency(text, 1, false).len();

    let unigrams = top_ngrams(text, 1, total_words, options);
    let bigrams = top_ngrams(text, 2, total_words, options);
    let trigrams = top_ngrams(text, 3, total_words, options);

    let mut issues = Vec::new();
    if total_words == 0 {
        issues.push(Issue::error("Content has no words"));
    } else if total_words < MIN_CONTENT_WORDS {
        issues.push(Issue::info(format!(
            "Content has only {} words; densities are less reliable under {}",
            total_words, MIN_CONTENT_WORDS
        )));
    }

    let target = target_keyword
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| KeywordDensityItem {
            keyword: keyword.to_string(),
            count: count_keyword_occurrences(text, keyword),
            density: round2(calculate_keyword_density(text, keyword)),
        });

    let mut reported = HashSet::new();
    if let Some(target) = &target {
        if target.count == 0 {
            issues.push(Issue::warning(format!(
                "Target keyword \"{}\" does not appear in the content",
                target.keyword
            )));
        } else if target.density > options.stuffing_threshold {
            reported.insert(target.keyword.to_lowercase());
            issues.push(Issue::warning(format!(
                "Target keyword \"{}\" density {}% is above {}%; this may read as keyword stuffing",
                target.keyword, target.density, options.stuffing_threshold
            )));
        } else if target.density < options.low_density_threshold {
            issues.push(Issue::info(format!(
                "Target keyword \"{}\" density {}% is below {}%",
                target.keyword, target.density, options.low_density_threshold
            )));
        }
    }

    // Short texts push every repeated word over the threshold
    if total_words >= MIN_CONTENT_WORDS {
        for item in &unigrams {
            if item.density > options.stuffing_threshold && reported.insert(item.keyword.clone()) {
                issues.push(Issue::warning(format!(
                    "\"{}\" makes up {}% of the content",
                    item.keyword, item.density
                )));
            }
        }
    }

    ::log::debug!(
        "Keyword density: {} words, {} unique, {} unigrams kept",
        total_words,
        unique_words,
        unigrams.len()
    );

    KeywordDensityResult {
        total_words,
        unique_words,
        unigrams,
        bigrams,
        trigrams,
        target,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str, target: Option<&str>) -> KeywordDensityResult {
        analyze_keyword_density(&KeywordDensityInput {
            content: content.to_string(),
            target_keyword: target.map(str::to_string),
            ..KeywordDensityInput::default()
        })
        .data
        .unwrap()
    }

    const ARTICLE: &str = "Rust is fast. Rust is safe. Rust programs run fast \
        because the Rust compiler checks memory safety at compile time.";

    #[test]
    fn test_unigrams() {
        let data = run(ARTICLE, None);
        assert_eq!(data.total_words, 20);
        let first = &data.unigrams[0];
        assert_eq!(first.keyword, "rust");
        assert_eq!(first.count, 4);
        assert_eq!(first.density, 20.0);
        // Stop words and short words are left out
        assert!(data.unigrams.iter().all(|item| item.keyword != "is"));
        assert!(data.unigrams.iter().all(|item| item.keyword != "at"));
    }

    #[test]
    fn test_ngrams_skip_stop_word_edges() {
        let data = run(ARTICLE, None);
        assert!(data.bigrams.iter().any(|item| item.keyword == "rust compiler"));
        assert!(data.bigrams.iter().all(|item| item.keyword != "rust is"));
        assert!(data.trigrams.iter().any(|item| item.keyword == "rust programs run"));
    }

    #[test]
    fn test_density_bounds() {
        for content in [ARTICLE, "word", "the the the", "a b c d e f g", "spam spam spam spam"] {
            let data = run(content, Some("spam"));
            for item in data
                .unigrams
                .iter()
                .chain(&data.bigrams)
                .chain(&data.trigrams)
                .chain(data.target.iter())
            {
                assert!((0.0..=100.0).contains(&item.density), "{:?}", item);
            }
        }
    }

    #[test]
    fn test_target_keyword() {
        let data = run(ARTICLE, Some("Rust compiler"));
        let target = data.target.unwrap();
        assert_eq!(target.count, 1);
        assert_eq!(target.density, 5.0);
        assert!(data.issues.iter().any(|i| i.message.contains("above")));
    }

    #[test]
    fn test_missing_target() {
        let data = run(ARTICLE, Some("python"));
        assert_eq!(data.target.as_ref().unwrap().count, 0);
        assert!(data.issues.iter().any(|i| i.message.contains("does not appear")));
    }

    #[test]
    fn test_top_n_and_stop_words_option() {
        let options = KeywordDensityConfig {
            top_n: 3,
            include_stop_words: true,
            min_word_length: 1,
            ..KeywordDensityConfig::default()
        };
        let data = analyze_keyword_density(&KeywordDensityInput {
            content: ARTICLE.to_string(),
            options,
            ..KeywordDensityInput::default()
        })
        .data
        .unwrap();
        assert_eq!(data.unigrams.len(), 3);
        assert_eq!(data.unigrams[1].keyword, "fast");
        assert_eq!(data.unigrams[2].keyword, "is");
    }

    #[test]
    fn test_html_content() {
        let data = analyze_keyword_density(&KeywordDensityInput {
            content: "<h1>Rust</h1><script>var rust = 1;</script><p>Rust rocks</p>".to_string(),
            is_html: true,
            ..KeywordDensityInput::default()
        })
        .data
        .unwrap();
        assert_eq!(data.total_words, 3);
        assert_eq!(data.unigrams[0].count, 2);
    }

    #[test]
    fn test_unmarked_html_warns() {
        let result = analyze_keyword_density(&KeywordDensityInput {
            content: "<p>Rust rocks</p>".to_string(),
            ..KeywordDensityInput::default()
        });
        assert!(result.success);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_empty_content_fails() {
        assert!(!analyze_keyword_density(&KeywordDensityInput::default()).success);
    }
}
