use crate::parsers::text;

#[cfg(test)]
mod counting_tests {
    use super::*;

    #[test]
    fn test_tokenize_words() {
        assert_eq!(
            text::tokenize_words("Don't stop—well-known café’s 42!"),
            vec!["Don't", "stop", "well-known", "café’s", "42"]
        );
        assert!(text::tokenize_words("  ... --- ").is_empty());
    }

    #[test]
    fn test_count_words() {
        assert_eq!(text::count_words(""), 0);
        assert_eq!(text::count_words("one two\tthree\nfour"), 4);
        assert_eq!(text::count_words("trailing- -leading"), 2);
    }

    #[test]
    fn test_count_sentences() {
        assert_eq!(text::count_sentences("Hello. World!! How?"), 3);
        assert_eq!(text::count_sentences("..."), 0);
        assert_eq!(text::count_sentences("No terminator"), 1);
        // Abbreviations are not special-cased
        assert_eq!(text::count_sentences("Dr. Smith arrived."), 2);
    }

    #[test]
    fn test_count_characters_and_lines() {
        assert_eq!(text::count_characters("a b\tc", true), 5);
        assert_eq!(text::count_characters("a b\tc", false), 3);
        assert_eq!(text::count_characters("héllo", true), 5);
        assert_eq!(text::count_lines(""), 0);
        assert_eq!(text::count_lines("a\nb\n"), 2);
    }

    #[test]
    fn test_split_into_paragraphs() {
        // Empty text
        assert!(text::split_into_paragraphs("").is_empty());

        // Multiple lines per paragraph
        let result = text::split_into_paragraphs("Line 1a\nLine 1b\n\nLine 2a\nLine 2b");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], vec!["Line 1a", "Line 1b"]);
        assert_eq!(result[1], vec!["Line 2a", "Line 2b"]);

        // Multiple consecutive empty lines, whitespace-only lines count as empty
        let result = text::split_into_paragraphs("Paragraph 1.\n\n  \t\n\nParagraph 2.");
        assert_eq!(result, vec![vec!["Paragraph 1."], vec!["Paragraph 2."]]);

        assert_eq!(text::count_paragraphs("\n\nOne\n\n\nTwo\n"), 2);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            text::normalize_whitespace("  Para   one\n  continues \n\n\n\nPara two  "),
            "Para one continues\n\nPara two"
        );
        assert_eq!(text::normalize_whitespace(" \n \n"), "");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(text::reading_time_minutes(400, 200), 2.0);
        assert_eq!(text::reading_time_minutes(10, 0), 0.0);
    }
}

#[cfg(test)]
mod frequency_tests {
    use super::*;

    #[test]
    fn test_word_frequency_case() {
        let insensitive = text::get_word_frequency("Apple apple APPLE pie", false);
        assert_eq!(insensitive.get("apple"), Some(&3));
        assert_eq!(insensitive.len(), 2);

        let sensitive = text::get_word_frequency("Apple apple APPLE pie", true);
        assert_eq!(sensitive.len(), 4);
    }

    #[test]
    fn test_ngram_frequency() {
        let bigrams = text::get_ngram_frequency("a b a b", 2, true);
        assert_eq!(bigrams.get("a b"), Some(&2));
        assert_eq!(bigrams.get("b a"), Some(&1));
        assert_eq!(bigrams.len(), 2);

        assert!(text::get_ngram_frequency("a b", 0, true).is_empty());
        assert!(text::get_ngram_frequency("a b", 3, true).is_empty());
    }

    #[test]
    fn test_sorted_frequencies() {
        let frequency = text::get_word_frequency("b a b c a b", true);
        let sorted = text::sorted_frequencies(&frequency);
        assert_eq!(
            sorted,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_keyword_occurrences_whole_words() {
        assert_eq!(text::count_keyword_occurrences("Rust rusty RUST trust", "rust"), 2);
        assert_eq!(
            text::count_keyword_occurrences("Search   engine tips for search engines", "search engine"),
            1
        );
        assert_eq!(text::count_keyword_occurrences("anything", "   "), 0);
    }

    #[test]
    fn test_keyword_matches_follow_word_tokens() {
        assert_eq!(text::count_keyword_occurrences("Don't stop, don", "don"), 1);
        assert_eq!(text::count_keyword_occurrences("well-known facts", "known"), 0);
        assert_eq!(text::count_keyword_occurrences("rust rust rust", "rust rust"), 1);
        assert_eq!(
            text::find_keyword_spans("Say  Search\nEngine twice: search engine", "search engine"),
            vec![5..18, 26..39]
        );
    }

    #[test]
    fn test_keyword_density() {
        assert_eq!(text::calculate_keyword_density("Rust rusty RUST trust", "rust"), 50.0);
        assert_eq!(text::calculate_keyword_density("", "rust"), 0.0);
        assert_eq!(text::calculate_keyword_density("rust rust", ""), 0.0);
        for sample in ["rust", "rust rust rust", "a rust b", "rust-lang rust"] {
            let density = text::calculate_keyword_density(sample, "rust");
            assert!((0.0..=100.0).contains(&density), "{}", sample);
        }
    }

    #[test]
    fn test_stop_words() {
        assert!(text::is_stop_word("The"));
        assert!(text::is_stop_word("and"));
        assert!(!text::is_stop_word("rust"));
        assert!(text::STOP_WORDS.contains("of"));
    }
}

#[cfg(test)]
mod social_token_tests {
    use super::*;

    #[test]
    fn test_extract_urls() {
        assert_eq!(
            text::extract_urls("Visit https://example.com/path. Or www.test.org, ok (http://a.io)"),
            vec!["https://example.com/path", "www.test.org", "http://a.io"]
        );
        assert!(text::extract_urls("no links here").is_empty());
    }

    #[test]
    fn test_extract_hashtags() {
        assert_eq!(
            text::extract_hashtags("#rust is #1 at #2024goals, see page#anchor #café"),
            vec!["#rust", "#2024goals", "#café"]
        );
    }

    #[test]
    fn test_extract_mentions() {
        assert_eq!(
            text::extract_mentions("@alice mail bob@example.com or @bob_2!"),
            vec!["@alice", "@bob_2"]
        );
    }

    #[test]
    fn test_count_emojis() {
        assert_eq!(text::count_emojis("Hi 🚀🎉 ☀"), 3);
        assert_eq!(text::count_emojis("plain text"), 0);
        // Flag, skin tone and ZWJ sequences are one emoji each
        assert_eq!(
            text::count_emojis("\u{1F1FA}\u{1F1F8} \u{1F44D}\u{1F3FD} \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}"),
            3
        );
        assert_eq!(text::count_graphemes("e\u{0301}\u{1F1FA}\u{1F1F8}"), 2);
    }

    #[test]
    fn test_levenshtein_and_similarity() {
        assert_eq!(text::levenshtein("", "abc"), 3);
        assert_eq!(text::levenshtein("flaw", "lawn"), 2);
        assert_eq!(text::levenshtein("héllo", "hello"), 1);
        assert_eq!(text::calculate_similarity("", ""), 100.0);
        assert_eq!(text::calculate_similarity("abc", "abc"), 100.0);
        assert_eq!(text::calculate_similarity("abc", "xyz"), 0.0);
        assert_eq!(text::calculate_similarity("kitten", "sitting"), 57.14);
    }
}
