use crate::config::TextConfig;
use crate::error::require;
use crate::parsers::text::{
    calculate_similarity, count_characters, count_emojis, count_graphemes, count_lines,
    count_paragraphs, count_sentences, levenshtein, normalize_whitespace, reading_time_minutes, tokenize_words,
};
use crate::results::ToolResult;
use crate::utils::round2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextStatsInput {
    pub text: String,
    #[serde(default)]
    pub options: TextConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub word_count: usize,
    pub character_count: usize,
    pub character_count_no_spaces: usize,
    /// Characters as a reader sees them; an emoji with a skin tone is one
    pub grapheme_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub line_count: usize,
    pub emoji_count: usize,
    pub average_word_length: f64,
    pub average_sentence_length: f64,
    pub reading_time_seconds: f64,
    pub speaking_time_seconds: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareTextsInput {
    pub original: String,
    #[serde(default)]
    pub modified: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextComparison {
    /// 0..=100
    pub similarity: f64,
    /// Character edits needed to turn one text into the other
    pub edit_distance: usize,
    pub original_words: usize,
    pub modified_words: usize,
    pub identical: bool,
    pub identical_ignoring_whitespace: bool,
}

/// Word, sentence and timing statistics for `text`
pub fn analyze_text(input: &TextStatsInput) -> ToolResult<TextStats> {
    ToolResult::run(|| {
        require(&input.text, "Text")?;
        Ok(stats(&input.text, &input.options))
    })
}

fn stats(text: &str, options: &TextConfig) -> TextStats {
    let words = tokenize_words(text);
    let word_count = words.len();
    let sentence_count = count_sentences(text);

    let letters: usize = words.iter().map(|w| w.chars().count()).sum();
    let average_word_length = if word_count == 0 {
        0.0
    } else {
        round2(letters as f64 / word_count as f64)
    };
    let average_sentence_length = if sentence_count == 0 {
        0.0
    } else {
        round2(word_count as f64 / sentence_count as f64)
    };

    let reading = reading_time_minutes(word_count, options.words_per_minute);
    let speaking = reading_time_minutes(word_count, options.speaking_words_per_minute);

    ::log::debug!("Text stats: {} words, {} sentences", word_count, sentence_count);

    TextStats {
        word_count,
        character_count: count_characters(text, true),
        character_count_no_spaces: count_characters(text, false),
        grapheme_count: count_graphemes(text),
        sentence_count,
        paragraph_count: count_paragraphs(text),
        line_count: count_lines(text),
        emoji_count: count_emojis(text),
        average_word_length,
        average_sentence_length,
        reading_time_seconds: round2(reading * 60.0),
        speaking_time_seconds: round2(speaking * 60.0),
    }
}

/// How close `modified` is to `original`
pub fn compare_texts(input: &CompareTextsInput) -> ToolResult<TextComparison> {
    ToolResult::run(|| {
        require(&input.original, "Original text")?;
        Ok(compare(&input.original, &input.modified))
    })
}

fn compare(original: &str, modified: &str) -> TextComparison {
    TextComparison {
        similarity: calculate_similarity(original, modified),
        edit_distance: levenshtein(original, modified),
        original_words: tokenize_words(original).len(),
        modified_words: tokenize_words(modified).len(),
        identical: original == modified,
        identical_ignoring_whitespace: normalize_whitespace(original)
            == normalize_whitespace(modified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats() {
        let text = "Rust is fast. It is also safe!\n\nSecond paragraph here.";
        let data = analyze_text(&TextStatsInput {
            text: text.to_string(),
            ..TextStatsInput::default()
        })
        .data
        .unwrap();
        assert_eq!(data.word_count, 10);
        assert_eq!(data.sentence_count, 3);
        assert_eq!(data.paragraph_count, 2);
        assert_eq!(data.line_count, 3);
        assert_eq!(data.average_sentence_length, 3.33);
        // 10 words at 200 wpm
        assert_eq!(data.reading_time_seconds, 3.0);
    }

    #[test]
    fn test_graphemes() {
        let data = analyze_text(&TextStatsInput {
            text: "Cafe\u{0301} \u{1F44D}\u{1F3FD}".to_string(),
            ..TextStatsInput::default()
        })
        .data
        .unwrap();
        assert_eq!(data.character_count, 8);
        assert_eq!(data.grapheme_count, 6);
        assert_eq!(data.emoji_count, 1);
    }

    #[test]
    fn test_custom_speed() {
        let data = analyze_text(&TextStatsInput {
            text: "one two three four five six".to_string(),
            options: TextConfig {
                words_per_minute: 60,
                speaking_words_per_minute: 30,
            },
        })
        .data
        .unwrap();
        assert_eq!(data.reading_time_seconds, 6.0);
        assert_eq!(data.speaking_time_seconds, 12.0);
        assert_eq!(data.average_word_length, 3.67);
    }

    #[test]
    fn test_compare() {
        let data = compare_texts(&CompareTextsInput {
            original: "kitten".to_string(),
            modified: "sitting".to_string(),
        })
        .data
        .unwrap();
        assert_eq!(data.edit_distance, 3);
        assert_eq!(data.similarity, 57.14);
        assert!(!data.identical);
    }

    #[test]
    fn test_compare_whitespace_only_change() {
        let data = compare_texts(&CompareTextsInput {
            original: "Hello   world\nagain".to_string(),
            modified: "Hello world again".to_string(),
        })
        .data
        .unwrap();
        assert!(!data.identical);
        assert!(data.identical_ignoring_whitespace);
    }

    #[test]
    fn test_empty_inputs_fail() {
        assert!(!analyze_text(&TextStatsInput::default()).success);
        assert!(!compare_texts(&CompareTextsInput::default()).success);
    }
}
