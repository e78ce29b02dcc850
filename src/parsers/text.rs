//! Lexical statistics over plain text.
//!
//! Words are runs of letters, marks and digits that may be joined by an
//! internal apostrophe or hyphen, so "don't" and "well-known" are one word
//! each while surrounding punctuation is dropped.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}]+(?:['’\-][\p{L}\p{M}\p{N}]+)*").unwrap()
});

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(?:https?://|www\.)[^\s<>"'`]+"#).unwrap());

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\p{L}\p{N}_&#/])(#[\p{L}\p{M}\p{N}_]+)").unwrap());

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\p{L}\p{N}_@.])(@[A-Za-z0-9_]{1,30})").unwrap());

static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{1F000}-\x{1F02F}\x{1F0A0}-\x{1F0FF}\x{1F1E6}-\x{1F1FF}\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}\x{2B50}\x{2B55}\x{2934}\x{2935}\x{3030}\x{303D}]").unwrap()
});

/// Common English words left out of keyword and slug output by default
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
    ])
});

/// Whether `word` is a stop word, ignoring case
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word.to_lowercase().as_str())
}

/// Words in order of appearance
pub fn tokenize_words(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn count_words(text: &str) -> usize {
    WORD.find_iter(text).count()
}

/// Character count, optionally ignoring whitespace
pub fn count_characters(text: &str, include_spaces: bool) -> usize {
    if include_spaces {
        text.chars().count()
    } else {
        text.chars().filter(|c| !c.is_whitespace()).count()
    }
}

/// Segments between runs of `.`, `!` and `?` that contain a letter or digit.
/// Abbreviations are not special-cased.
pub fn count_sentences(text: &str) -> usize {
    SENTENCE_BREAK
        .split(text)
        .filter(|segment| segment.chars().any(char::is_alphanumeric))
        .count()
}

/// Blocks of text separated by blank lines
pub fn count_paragraphs(text: &str) -> usize {
    split_into_paragraphs(text).len()
}

pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}

/// Splits text into paragraphs based on empty lines
pub fn split_into_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current_paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            // An empty line closes the current paragraph
            if !current_paragraph.is_empty() {
                paragraphs.push(std::mem::take(&mut current_paragraph));
            }
        } else {
            current_paragraph.push(trimmed);
        }
    }

    if !current_paragraph.is_empty() {
        paragraphs.push(current_paragraph);
    }

    paragraphs
}

/// Single spaces inside paragraphs, one blank line between them
pub fn normalize_whitespace(text: &str) -> String {
    split_into_paragraphs(text)
        .iter()
        .map(|paragraph| {
            paragraph
                .iter()
                .flat_map(|line| line.split_whitespace())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn normalized_tokens(text: &str, case_sensitive: bool) -> Vec<String> {
    tokenize_words(text)
        .into_iter()
        .map(|word| {
            if case_sensitive {
                word.to_string()
            } else {
                word.to_lowercase()
            }
        })
        .collect()
}

/// Occurrences of each word
pub fn get_word_frequency(text: &str, case_sensitive: bool) -> HashMap<String, usize> {
    get_ngram_frequency(text, 1, case_sensitive)
}

/// Occurrences of each run of `n` consecutive words, joined by single spaces
pub fn get_ngram_frequency(text: &str, n: usize, case_sensitive: bool) -> HashMap<String, usize> {
    let mut frequency = HashMap::new();
    if n == 0 {
        return frequency;
    }

    let tokens = normalized_tokens(text, case_sensitive);
    for window in tokens.windows(n) {
        *frequency.entry(window.join(" ")).or_insert(0) += 1;
    }
    frequency
}

/// Frequency entries by count descending, then alphabetically
pub fn sorted_frequencies(frequency: &HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = frequency
        .iter()
        .map(|(key, count)| (key.clone(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Char ranges of `keyword` (which may span several words) in `text`. Words are compared case-insensitively on the same tokens as
/// [`tokenize_words`], so `don` never matches inside `don't`. Matches do not
/// overlap.
pub fn find_keyword_spans(text: &str, keyword: &str) -> Vec<Range<usize>> {
    let needle: Vec<String> = WORD
        .find_iter(keyword)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let words: Vec<(Range<usize>, String)> = WORD
        .find_iter(text)
        .map(|m| (m.range(), m.as_str().to_lowercase()))
        .collect();

    let mut spans = Vec::new();
    let mut idx = 0;
    while idx + needle.len() <= words.len() {
        let window = &words[idx..idx + needle.len()];
        if window.iter().zip(&needle).all(|((_, word), part)| word == part) {
            let start = text[..window[0].0.start].chars().count();
            let end = start + text[window[0].0.start..window[needle.len() - 1].0.end].chars().count();
            spans.push(start..end);
            idx += needle.len();
        } else {
            idx += 1;
        }
    }
    spans
}

/// Whole-word, case-insensitive occurrences of `keyword`
pub fn count_keyword_occurrences(text: &str, keyword: &str) -> usize {
    find_keyword_spans(text, keyword).len()
}

/// Percentage of words in `text` accounted for by matches of `keyword`,
/// always within 0..=100
pub fn calculate_keyword_density(text: &str, keyword: &str) -> f64 {
    let total_words = count_words(text);
    if total_words == 0 {
        return 0.0;
    }
    let matches = count_keyword_occurrences(text, keyword);
    (matches as f64 / total_words as f64 * 100.0).clamp(0.0, 100.0)
}

/// URLs in order of appearance, trailing punctuation removed
pub fn extract_urls(text: &str) -> Vec<String> {
    URL.find_iter(text)
        .map(|m| {
            m.as_str()
                .trim_end_matches(['.', ',', ';', ':', '!', '?', ')', ']', '}'])
                .to_string()
        })
        .collect()
}

/// Hashtags including the leading `#`. Purely numeric tags are skipped.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|tag| tag[1..].chars().any(|c| !c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Mentions including the leading `@`. Email addresses are not mentions.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Number of emoji code points
pub fn count_emojis(text: &str) -> usize {
    text.graphemes(true).filter(|g| is_emoji(g)).count()
}

/// Whether a grapheme cluster is (or starts with) an emoji. Skin tones,
/// flags and ZWJ sequences are one cluster.
pub fn is_emoji(grapheme: &str) -> bool {
    EMOJI.is_match(grapheme)
}

/// User-perceived characters
pub fn count_graphemes(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Edit distance between `a` and `b`, counted in characters
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Similarity of two texts as a percentage, from normalized edit distance
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 100.0;
    }
    let distance = levenshtein(a, b);
    crate::utils::round2((1.0 - distance as f64 / longest as f64) * 100.0)
}

/// Minutes needed to get through `words` at `words_per_minute`
pub fn reading_time_minutes(words: usize, words_per_minute: u32) -> f64 {
    if words_per_minute == 0 {
        return 0.0;
    }
    words as f64 / f64::from(words_per_minute)
}
