use crate::config::SlugConfig;
use crate::error::require;
use crate::parsers::text::is_stop_word;
use crate::results::{Issue, ToolResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlugInput {
    /// A page title, phrase, or an existing slug
    pub text: String,
    #[serde(default)]
    pub options: SlugConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugResult {
    pub slug: String,
    pub original: String,
    pub length: usize,
    pub word_count: usize,
    pub removed_words: Vec<String>,
    pub issues: Vec<Issue>,
}

/// Map accented Latin letters to ASCII
fn fold_char(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' => "r",
        'ś' | 'š' | 'ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'þ' => "th",
        _ => return None,
    };
    Some(folded)
}

/// Lower-case ASCII words of `text`, with accents folded and `&` spelled out
pub fn slug_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            current.push(c);
        } else if let Some(folded) = fold_char(c) {
            current.push_str(folded);
        } else if c == '\'' || c == '’' {
            // "don't" -> "dont"
        } else if c == '&' {
            flush(&mut current, &mut words);
            words.push("and".to_string());
        } else {
            flush(&mut current, &mut words);
        }
    }
    flush(&mut current, &mut words);

    words
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Build a URL slug from `text`
pub fn optimize_slug(input: &SlugInput) -> ToolResult<SlugResult> {
    ToolResult::run(|| {
        require(&input.text, "Text")?;
        Ok(build_slug(&input.text, &input.options))
    })
}

fn build_slug(text: &str, options: &SlugConfig) -> SlugResult {
    let separator = options.separator.as_str();
    let words = slug_words(text);

    let mut removed_words = Vec::new();
    let mut kept: Vec<String> = if options.remove_stop_words {
        let (stop, content): (Vec<String>, Vec<String>) =
            words.iter().cloned().partition(|w| is_stop_word(w));
        if content.is_empty() {
            // Never strip a slug down to nothing
            words.clone()
        } else {
            removed_words = stop;
            content
        }
    } else {
        words.clone()
    };

    // Drop whole words from the end until the slug fits
    while kept.len() > 1 && kept.join(separator).chars().count() > options.max_length {
        if let Some(word) = kept.pop() {
            removed_words.push(word);
        }
    }
    let mut slug = kept.join(separator);
    if slug.chars().count() > options.max_length {
        slug = slug.chars().take(options.max_length).collect();
    }

    let mut issues = Vec::new();
    if slug.is_empty() {
        issues.push(Issue::error("Text has no characters usable in a URL"));
    }
    if kept.len() > 5 {
        issues.push(Issue::info(format!(
            "Slug has {} words; 3 to 5 is usually enough",
            kept.len()
        )));
    }
    if kept.iter().any(|w| w.len() >= 4 && w.chars().all(|c| c.is_ascii_digit())) {
        issues.push(Issue::info("Slug contains a year or long number that may date the URL"));
    }

    let trimmed = text.trim();
    if !trimmed.contains(char::is_whitespace) {
        // Looks like an existing slug: say what was changed
        if trimmed.chars().any(char::is_uppercase) {
            issues.push(Issue::warning("Original contains uppercase letters"));
        }
        if trimmed.contains('_') {
            issues.push(Issue::warning("Original uses underscores; hyphens are preferred"));
        }
        if trimmed.contains("--") {
            issues.push(Issue::warning("Original contains repeated hyphens"));
        }
    }

    ::log::debug!("Slug '{}' from {} words", slug, words.len());

    SlugResult {
        length: slug.chars().count(),
        word_count: kept.len(),
        slug,
        original: text.to_string(),
        removed_words,
        issues,
    }
}
