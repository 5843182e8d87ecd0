use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static PARAGRAPH_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
});

static HTML_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static BLOCK_CLOSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)</(?:p|div|h[1-6]|li|blockquote|section|article|header|footer|ul|ol|table|tr|pre|figure)\s*>",
    )
    .unwrap()
});

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

// WordPress-style shortcodes: [gallery ids="1,2"], [/caption]
static SHORTCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[/?[A-Za-z_][\w-]*(?:\s[^\]]*)?/?\]").unwrap());

static INLINE_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{00A0}]+").unwrap());

static EXTRA_NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

// Decimal, hex and named references, decoded in a single pass so "&amp;lt;"
// yields "&lt;" and never "<".
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[xX]([0-9A-Fa-f]{1,6})|#([0-9]{1,7})|([A-Za-z]+));").unwrap()
});

const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("nbsp", " "),
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("rsquo", "\u{2019}"),
    ("lsquo", "\u{2018}"),
    ("rdquo", "\u{201D}"),
    ("ldquo", "\u{201C}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("hellip", "\u{2026}"),
];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Words at or above this many syllables count as complex.
pub const COMPLEX_WORD_SYLLABLES: usize = 3;

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

/// Reduce post HTML to plain prose. Block-level closings become paragraph
/// breaks so paragraph statistics survive the conversion.
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT_STYLE_RE.replace_all(html, "");
    let text = HTML_COMMENT_RE.replace_all(&text, "");
    let text = BLOCK_CLOSE_RE.replace_all(&text, "\n\n");
    let text = LINE_BREAK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = SHORTCODE_RE.replace_all(&text, "");

    let decoded = decode_entities(&text);

    let lines: Vec<String> = decoded
        .split('\n')
        .map(|line| INLINE_SPACE_RE.replace_all(line.trim(), " ").into_owned())
        .collect();
    let joined = lines.join("\n");
    EXTRA_NEWLINES_RE
        .replace_all(joined.trim(), "\n\n")
        .into_owned()
}

/// Unknown names and invalid code points are left as written.
fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str()
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
            } else {
                caps.get(3).and_then(|name| {
                    NAMED_ENTITIES
                        .iter()
                        .find(|(n, _)| *n == name.as_str())
                        .map(|(_, r)| r.to_string())
                })
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

// ---------------------------------------------------------------------------
// Tokenization
// ---------------------------------------------------------------------------

fn trim_word(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Whitespace-separated tokens with surrounding punctuation removed.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(trim_word)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Sentence fragments split on runs of `.`, `!` and `?`. Fragments with no
/// word characters are discarded.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

/// Blocks separated by one or more blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|p| p.chars().any(char::is_alphanumeric))
        .collect()
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

pub fn count_sentences(text: &str) -> usize {
    split_sentences(text).len()
}

pub fn count_words(text: &str) -> usize {
    words(text).len()
}

pub fn count_paragraphs(text: &str) -> usize {
    split_paragraphs(text).len()
}

/// Vowel-group syllable estimate. Any non-empty word has at least one
/// syllable; a token with no letters or digits has none.
pub fn count_syllables(word: &str) -> usize {
    let word = trim_word(word);
    if word.is_empty() {
        return 0;
    }

    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    let mut count = 0usize;
    let mut prev_vowel = false;
    for c in &letters {
        let is_vowel = VOWELS.contains(c);
        if is_vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = is_vowel;
    }

    // Silent trailing "e": "make", "stone"
    if count > 1 && letters.last() == Some(&'e') {
        count -= 1;
    }

    count.max(1)
}

pub fn count_complex_words(text: &str) -> usize {
    words(text)
        .into_iter()
        .filter(|w| count_syllables(w) >= COMPLEX_WORD_SYLLABLES)
        .count()
}

/// Letters and digits inside words; punctuation and whitespace excluded.
pub fn count_characters(text: &str) -> usize {
    words(text)
        .into_iter()
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).count())
        .sum()
}

// ---------------------------------------------------------------------------
// Aggregate statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    pub complex_word_count: usize,
    pub character_count: usize,
    pub paragraph_count: usize,
}

impl TextStatistics {
    /// Single pass over the word list for the per-word counts.
    pub fn from_text(text: &str) -> Self {
        let mut stats = TextStatistics {
            sentence_count: count_sentences(text),
            paragraph_count: count_paragraphs(text),
            ..Default::default()
        };
        for word in words(text) {
            let syllables = count_syllables(word);
            stats.word_count += 1;
            stats.syllable_count += syllables;
            stats.character_count += word.chars().filter(|c| c.is_alphanumeric()).count();
            if syllables >= COMPLEX_WORD_SYLLABLES {
                stats.complex_word_count += 1;
            }
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    pub fn words_per_sentence(&self) -> f64 {
        ratio(self.word_count, self.sentence_count)
    }

    pub fn syllables_per_word(&self) -> f64 {
        ratio(self.syllable_count, self.word_count)
    }

    pub fn characters_per_word(&self) -> f64 {
        ratio(self.character_count, self.word_count)
    }
}

/// `num / den`, or 0.0 when `den` is zero.
pub(crate) fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
