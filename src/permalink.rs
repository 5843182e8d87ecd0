use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rubric::{RubricScore, ScoreFactor};

struct Hyperparameters {
    keyword_points: u32,
    length_points: u32,
    length_partial_points: u32,
    length_good_max: usize,
    length_ok_max: usize,
    stop_word_points: u32,
    case_points: u32,
    charset_points: u32,
    word_count_points: u32,
    word_count_min: usize,
    word_count_max: usize,
    suggest_max_words: usize,
}

static HP: Hyperparameters = Hyperparameters {
    keyword_points: 30,
    length_points: 20,
    length_partial_points: 10,
    length_good_max: 50,
    length_ok_max: 75,
    stop_word_points: 15,
    case_points: 15,
    charset_points: 10,
    word_count_points: 10,
    word_count_min: 3,
    word_count_max: 5,
    suggest_max_words: 5,
};

static CLEAN_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

static SLUG_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "nor", "of", "in", "on", "at", "to", "for", "by",
        "with", "from", "as", "is", "are", "was", "were", "be", "been", "it", "its", "this",
        "that", "these", "those", "your", "our", "my", "you", "we", "i", "how", "what", "why",
        "when", "where", "which", "who", "do", "does", "did", "can", "will", "into", "about",
        "so", "than", "then", "there", "their", "very", "just",
    ]
    .into_iter()
    .collect()
});

/// Last non-empty path segment of a permalink; a bare slug is returned as-is.
pub fn slug_from_permalink(permalink: &str) -> &str {
    let without_query = permalink.split(['?', '#']).next().unwrap_or(permalink);
    without_query
        .rsplit('/')
        .find(|seg| !seg.is_empty())
        .unwrap_or("")
}

/// Lowercase ASCII words joined by single hyphens.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn slug_words(slug: &str) -> Vec<&str> {
    slug.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether the keyword's words appear as a consecutive run of slug words.
/// "cat" matches `best-cat-toys` but not `category-tips`.
pub fn slug_has_keyword(slug: &str, keyword: &str) -> bool {
    let keyword_slug = slugify(keyword);
    let needle = slug_words(&keyword_slug);
    if needle.is_empty() {
        return false;
    }
    let haystack: Vec<String> = slug_words(slug).into_iter().map(str::to_lowercase).collect();
    haystack
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(a, b)| a.as_str() == *b))
}

#[tracing::instrument]
pub fn analyze_permalink(permalink: &str, keyword: Option<&str>) -> RubricScore {
    let slug = slug_from_permalink(permalink.trim());
    let words = slug_words(slug);
    let has_slug = !words.is_empty();

    let keyword_slug = keyword.map(slugify).filter(|k| !k.is_empty());
    let keyword_words: Vec<&str> = keyword_slug.as_deref().map(slug_words).unwrap_or_default();

    let keyword_present = match keyword_slug.as_deref() {
        Some(k) => slug_has_keyword(slug, k),
        None => false,
    };
    let keyword_factor = ScoreFactor::check(
        "keyword_in_slug",
        keyword_present,
        HP.keyword_points,
        match keyword_slug.as_deref() {
            Some(k) if keyword_present => format!("Slug contains '{k}'"),
            Some(k) => format!("Slug does not contain '{k}'"),
            None => "No focus keyword to check".to_string(),
        },
    );

    let len = slug.chars().count();
    let length_earned = if !has_slug {
        0
    } else if len <= HP.length_good_max {
        HP.length_points
    } else if len <= HP.length_ok_max {
        HP.length_partial_points
    } else {
        0
    };
    let length = ScoreFactor::graded(
        "length",
        length_earned,
        HP.length_points,
        format!(
            "Slug is {len} characters (aim for {} or fewer)",
            HP.length_good_max
        ),
    );

    // Stop words that belong to the keyword itself are allowed.
    let stop_words: Vec<String> = words
        .iter()
        .map(|w| w.to_lowercase())
        .filter(|w| SLUG_STOPWORDS.contains(w.as_str()) && !keyword_words.contains(&w.as_str()))
        .collect();
    let stop_factor = ScoreFactor::check(
        "stop_words",
        has_slug && stop_words.is_empty(),
        HP.stop_word_points,
        if stop_words.is_empty() {
            "Slug has no stop words".to_string()
        } else {
            format!("Remove stop words: {}", stop_words.join(", "))
        },
    );

    let lower_hyphenated = has_slug
        && !slug.chars().any(|c| c.is_uppercase())
        && !slug.contains('_')
        && !slug.contains(' ');
    let case_factor = ScoreFactor::check(
        "lowercase_hyphens",
        lower_hyphenated,
        HP.case_points,
        if lower_hyphenated {
            "Slug is lowercase and hyphen-separated"
        } else {
            "Use lowercase words separated by hyphens"
        },
    );

    let clean = CLEAN_SLUG_RE.is_match(slug);
    let charset_factor = ScoreFactor::check(
        "characters",
        clean,
        HP.charset_points,
        if clean {
            "Slug uses only letters, digits and single hyphens"
        } else {
            "Slug contains special characters or stray hyphens"
        },
    );

    let word_count = words.len();
    let word_count_factor = ScoreFactor::check(
        "word_count",
        (HP.word_count_min..=HP.word_count_max).contains(&word_count),
        HP.word_count_points,
        format!(
            "Slug has {word_count} words (aim for {}-{})",
            HP.word_count_min, HP.word_count_max
        ),
    );

    RubricScore::from_factors(vec![
        keyword_factor,
        length,
        stop_factor,
        case_factor,
        charset_factor,
        word_count_factor,
    ])
}

/// Build a short slug from a post title: stop words dropped, focus keyword
/// kept intact and moved to the front when the title does not contain it.
pub fn suggest_slug(title: &str, keyword: Option<&str>) -> String {
    let keyword_slug = keyword.map(slugify).unwrap_or_default();
    let keyword_words = slug_words(&keyword_slug);

    let title_slug = slugify(title);
    let mut seen = HashSet::new();
    let mut words: Vec<&str> = slug_words(&title_slug)
        .into_iter()
        .filter(|w| !SLUG_STOPWORDS.contains(w) || keyword_words.contains(w))
        .filter(|w| seen.insert(*w))
        .collect();

    if !keyword_words.is_empty() && !slug_has_keyword(&words.join("-"), &keyword_slug) {
        let rest = words.into_iter().filter(|w| !keyword_words.contains(w));
        words = keyword_words.iter().copied().chain(rest).collect();
    }

    let limit = HP.suggest_max_words.max(keyword_words.len());
    words.truncate(limit);
    words.join("-")
}
