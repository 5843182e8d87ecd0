use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rubric::{RubricScore, ScoreFactor};

struct Hyperparameters {
    alt_present_points: u32,
    alt_length_points: u32,
    alt_length_min: usize,
    alt_length_max: usize,
    keyword_in_alt_points: u32,
    title_points: u32,
    filename_points: u32,
    size_small_bytes: u64,
    size_small_points: u32,
    size_medium_bytes: u64,
    size_medium_points: u32,
}

static HP: Hyperparameters = Hyperparameters {
    alt_present_points: 30,
    alt_length_points: 10,
    alt_length_min: 50,
    alt_length_max: 125,
    keyword_in_alt_points: 20,
    title_points: 10,
    filename_points: 10,
    size_small_bytes: 100 * 1024,
    size_small_points: 20,
    size_medium_bytes: 200 * 1024,
    size_medium_points: 10,
};

static SLUG_FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

// Camera and OS defaults: IMG_1234, DSC0042, Screenshot-2024-01-01, image1
static GENERIC_FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:img|image|dsc|dscn|dcim|photo|pic|picture|screenshot|screen-shot|untitled|download|file)(?:[-_]?\d.*)?$",
    )
    .unwrap()
});

/// Attachment metadata the image rubric looks at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageInput {
    pub filename: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Bytes on disk, when known.
    #[serde(default)]
    pub file_size: Option<u64>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn file_stem(filename: &str) -> &str {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    }
}

/// Lowercase, hyphen-separated, descriptive. Camera defaults and bare
/// numbers do not count.
pub fn is_seo_friendly_filename(filename: &str) -> bool {
    let stem = file_stem(filename);
    SLUG_FILENAME_RE.is_match(stem)
        && stem.chars().any(|c| c.is_ascii_alphabetic())
        && !GENERIC_FILENAME_RE.is_match(stem)
}

#[tracing::instrument(skip(image), fields(filename = %image.filename))]
pub fn analyze_image_seo(image: &ImageInput, keyword: Option<&str>) -> RubricScore {
    let alt = non_blank(&image.alt);
    let alt_len = alt.map(|a| a.chars().count()).unwrap_or(0);

    let alt_present = ScoreFactor::check(
        "alt_text",
        alt.is_some(),
        HP.alt_present_points,
        if alt.is_some() {
            "Image has alt text"
        } else {
            "Image is missing alt text"
        },
    );

    let alt_length = ScoreFactor::check(
        "alt_length",
        (HP.alt_length_min..=HP.alt_length_max).contains(&alt_len),
        HP.alt_length_points,
        format!(
            "Alt text is {alt_len} characters (aim for {}-{})",
            HP.alt_length_min, HP.alt_length_max
        ),
    );

    let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());
    let keyword_in_alt = match (alt, keyword) {
        (Some(a), Some(k)) => a.to_lowercase().contains(&k.to_lowercase()),
        _ => false,
    };
    let keyword_factor = ScoreFactor::check(
        "keyword_in_alt",
        keyword_in_alt,
        HP.keyword_in_alt_points,
        match keyword {
            Some(k) if keyword_in_alt => format!("Alt text contains '{k}'"),
            Some(k) => format!("Alt text does not contain '{k}'"),
            None => "No focus keyword to check".to_string(),
        },
    );

    let has_title = non_blank(&image.title).is_some();
    let title = ScoreFactor::check(
        "title",
        has_title,
        HP.title_points,
        if has_title {
            "Image has a title"
        } else {
            "Image is missing a title"
        },
    );

    let friendly = is_seo_friendly_filename(&image.filename);
    let filename = ScoreFactor::check(
        "filename",
        friendly,
        HP.filename_points,
        if friendly {
            format!("'{}' is descriptive", image.filename)
        } else {
            format!(
                "Rename '{}' to descriptive lowercase-hyphenated words",
                image.filename
            )
        },
    );

    let (size_earned, size_message) = match image.file_size {
        Some(bytes) if bytes < HP.size_small_bytes => {
            (HP.size_small_points, format!("{} KB is light", bytes / 1024))
        }
        Some(bytes) if bytes < HP.size_medium_bytes => (
            HP.size_medium_points,
            format!("{} KB could be compressed further", bytes / 1024),
        ),
        Some(bytes) => (0, format!("{} KB is too heavy", bytes / 1024)),
        None => (0, "File size unknown".to_string()),
    };
    let size = ScoreFactor::graded(
        "file_size",
        size_earned,
        HP.size_small_points,
        size_message,
    );

    RubricScore::from_factors(vec![
        alt_present,
        alt_length,
        keyword_factor,
        title,
        filename,
        size,
    ])
}
