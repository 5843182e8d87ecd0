use serde::{Deserialize, Serialize};

use crate::image::{analyze_image_seo, ImageInput};
use crate::permalink::{analyze_permalink, slug_has_keyword};
use crate::readability::{analyze_readability, round1, ReadabilityReport};
use crate::rubric::{RubricScore, ScoreFactor, UnifiedReport};
use crate::text;

struct Hyperparameters {
    keyword_in_title_points: u32,
    title_length_points: u32,
    title_length_min: usize,
    title_length_max: usize,
    description_length_points: u32,
    description_length_min: usize,
    description_length_max: usize,
    keyword_in_description_points: u32,
    keyword_in_intro_points: u32,
    density_points: u32,
    density_min: f64,
    density_max: f64,
    length_points: u32,
    length_partial_points: u32,
    length_good_words: usize,
    length_ok_words: usize,
    keyword_in_slug_points: u32,
    readability_points: u32,
    readability_min_ease: f64,
}

static HP: Hyperparameters = Hyperparameters {
    keyword_in_title_points: 10,
    title_length_points: 10,
    title_length_min: 30,
    title_length_max: 60,
    description_length_points: 10,
    description_length_min: 120,
    description_length_max: 160,
    keyword_in_description_points: 10,
    keyword_in_intro_points: 10,
    density_points: 15,
    density_min: 0.5,
    density_max: 2.5,
    length_points: 15,
    length_partial_points: 8,
    length_good_words: 600,
    length_ok_words: 300,
    keyword_in_slug_points: 10,
    readability_points: 10,
    readability_min_ease: 60.0,
};

/// A post as the host hands it over. `content` is plain text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentAnalysis {
    pub keyword: String,
    pub word_count: usize,
    pub keyword_occurrences: usize,
    pub keyword_density: f64,
    pub readability: ReadabilityReport,
    pub score: RubricScore,
}

fn lower_words(text: &str) -> Vec<String> {
    text::words(text).into_iter().map(str::to_lowercase).collect()
}

/// Whole-word, case-insensitive phrase occurrences.
pub fn count_phrase(text: &str, phrase: &str) -> usize {
    let needle = lower_words(phrase);
    if needle.is_empty() {
        return 0;
    }
    let haystack = lower_words(text);
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle.as_slice())
        .count()
}

fn contains_phrase(text: &str, phrase: &str) -> bool {
    count_phrase(text, phrase) > 0
}

/// Keyword occurrences per 100 words.
pub fn keyword_density(text: &str, keyword: &str) -> f64 {
    let words = text::count_words(text);
    round1(100.0 * text::ratio(count_phrase(text, keyword), words))
}

#[tracing::instrument(skip(input), fields(keyword = %input.keyword, text_len = input.content.len()))]
pub fn analyze_content(input: &ContentInput) -> ContentAnalysis {
    let keyword = input.keyword.trim();
    let has_keyword = !keyword.is_empty();
    let readability = analyze_readability(&input.content);
    let word_count = readability.statistics.word_count;
    let occurrences = if has_keyword {
        count_phrase(&input.content, keyword)
    } else {
        0
    };
    let density = round1(100.0 * text::ratio(occurrences, word_count));

    let title = input.title.trim();
    let title_len = title.chars().count();
    let description = input.description.trim();
    let description_len = description.chars().count();
    let intro = text::split_paragraphs(&input.content)
        .into_iter()
        .next()
        .unwrap_or("");

    let keyword_check = |name: &str, field: &str, label: &str, points: u32| {
        let found = has_keyword && contains_phrase(field, keyword);
        ScoreFactor::check(
            name,
            found,
            points,
            if !has_keyword {
                "No focus keyword set".to_string()
            } else if found {
                format!("Focus keyword appears in the {label}")
            } else {
                format!("Add the focus keyword to the {label}")
            },
        )
    };

    let length_earned = if word_count >= HP.length_good_words {
        HP.length_points
    } else if word_count >= HP.length_ok_words {
        HP.length_partial_points
    } else {
        0
    };

    let keyword_in_slug = has_keyword && slug_has_keyword(&input.slug, keyword);

    let factors = vec![
        keyword_check("keyword_in_title", title, "title", HP.keyword_in_title_points),
        ScoreFactor::check(
            "title_length",
            (HP.title_length_min..=HP.title_length_max).contains(&title_len),
            HP.title_length_points,
            format!(
                "Title is {title_len} characters (aim for {}-{})",
                HP.title_length_min, HP.title_length_max
            ),
        ),
        ScoreFactor::check(
            "description_length",
            (HP.description_length_min..=HP.description_length_max).contains(&description_len),
            HP.description_length_points,
            format!(
                "Meta description is {description_len} characters (aim for {}-{})",
                HP.description_length_min, HP.description_length_max
            ),
        ),
        keyword_check(
            "keyword_in_description",
            description,
            "meta description",
            HP.keyword_in_description_points,
        ),
        keyword_check(
            "keyword_in_intro",
            intro,
            "first paragraph",
            HP.keyword_in_intro_points,
        ),
        ScoreFactor::check(
            "keyword_density",
            has_keyword && density >= HP.density_min && density <= HP.density_max,
            HP.density_points,
            format!(
                "Keyword density is {density:.1}% (aim for {}-{}%)",
                HP.density_min, HP.density_max
            ),
        ),
        ScoreFactor::graded(
            "content_length",
            length_earned,
            HP.length_points,
            format!(
                "{word_count} words (aim for {} or more)",
                HP.length_good_words
            ),
        ),
        ScoreFactor::check(
            "keyword_in_slug",
            keyword_in_slug,
            HP.keyword_in_slug_points,
            if keyword_in_slug {
                "Slug contains the focus keyword"
            } else {
                "Add the focus keyword to the slug"
            },
        ),
        ScoreFactor::check(
            "readability",
            readability.flesch_reading_ease >= HP.readability_min_ease,
            HP.readability_points,
            format!(
                "Flesch reading ease {:.1} (aim for {} or higher)",
                readability.flesch_reading_ease, HP.readability_min_ease
            ),
        ),
    ];

    let score = RubricScore::from_factors(factors);
    tracing::debug!(
        earned = score.earned,
        percentage = score.percentage,
        "content analysis"
    );

    ContentAnalysis {
        keyword: keyword.to_string(),
        word_count,
        keyword_occurrences: occurrences,
        keyword_density: density,
        readability,
        score,
    }
}

/// Content, readability, permalink and per-image scores rolled into one
/// overall bucket.
pub fn unified_report(input: &ContentInput, images: &[ImageInput]) -> UnifiedReport {
    let analysis = analyze_content(input);
    let keyword = Some(input.keyword.trim()).filter(|k| !k.is_empty());

    let mut report = UnifiedReport::new();
    report.push("readability", analysis.readability.score());
    report.push("content", analysis.score);
    if !input.slug.trim().is_empty() {
        report.push("permalink", analyze_permalink(&input.slug, keyword));
    }
    for image in images {
        let name = format!("image:{}", image.filename);
        report.push(&name, analyze_image_seo(image, keyword));
    }
    report
}
