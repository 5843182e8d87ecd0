use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::rubric::{RubricScore, ScoreFactor, Status};

struct Hyperparameters {
    word_count_points: [u32; 4],
    length_points: u32,
    length_partial_points: u32,
    length_short_max: usize,
    length_medium_max: usize,
    commercial_points: u32,
    head_term_points: u32,
}

static HP: Hyperparameters = Hyperparameters {
    // 1 word, 2 words, 3 words, 4+ words
    word_count_points: [40, 30, 20, 10],
    length_points: 20,
    length_partial_points: 10,
    length_short_max: 9,
    length_medium_max: 19,
    commercial_points: 20,
    head_term_points: 20,
};

static COMMERCIAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:buy|best|top|cheap|cheapest|price|prices|pricing|cost|deal|deals|discount|coupon|review|reviews|vs|versus|compare|comparison|sale|shop|hire|near me)\b",
    )
    .unwrap()
});

static QUESTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:how|what|why|where|when|who|which|can|does|do|is|are|should)\b|\?$")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Hard,
    Medium,
    Easy,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordDifficulty {
    pub keyword: String,
    pub difficulty: u32,
    pub level: DifficultyLevel,
    pub score: RubricScore,
}

fn normalize(keyword: &str) -> String {
    keyword.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Estimate how hard a keyword is to rank for, 0-100 (higher is harder).
/// Short, commercial head terms score high; long-tail questions score low.
#[tracing::instrument]
pub fn keyword_difficulty(keyword: &str) -> KeywordDifficulty {
    let keyword = normalize(keyword);
    let words = keyword.split(' ').filter(|w| !w.is_empty()).count();
    let len = keyword.chars().count();

    let word_earned = match words {
        0 => 0,
        1 => HP.word_count_points[0],
        2 => HP.word_count_points[1],
        3 => HP.word_count_points[2],
        _ => HP.word_count_points[3],
    };
    let word_factor = ScoreFactor::graded(
        "word_count",
        word_earned,
        HP.word_count_points[0],
        format!("{words} word(s); longer phrases face less competition"),
    );

    let length_earned = if len == 0 {
        0
    } else if len <= HP.length_short_max {
        HP.length_points
    } else if len <= HP.length_medium_max {
        HP.length_partial_points
    } else {
        0
    };
    let length_factor = ScoreFactor::graded(
        "length",
        length_earned,
        HP.length_points,
        format!("{len} characters"),
    );

    let commercial = COMMERCIAL_RE.is_match(&keyword);
    let commercial_factor = ScoreFactor::check(
        "commercial_intent",
        commercial,
        HP.commercial_points,
        if commercial {
            "Commercial modifiers attract paid competition"
        } else {
            "No commercial modifiers"
        },
    );

    let head_term = !keyword.is_empty() && !QUESTION_RE.is_match(&keyword);
    let head_factor = ScoreFactor::check(
        "head_term",
        head_term,
        HP.head_term_points,
        if head_term {
            "Not phrased as a question"
        } else {
            "Question phrasing targets long-tail searches"
        },
    );

    let score = RubricScore::from_factors(vec![
        word_factor,
        length_factor,
        commercial_factor,
        head_factor,
    ]);
    let level = match score.status {
        Status::Good => DifficultyLevel::Hard,
        Status::Ok => DifficultyLevel::Medium,
        Status::Poor => DifficultyLevel::Easy,
    };
    tracing::debug!(difficulty = score.percentage, ?level, "keyword difficulty");

    KeywordDifficulty {
        keyword,
        difficulty: score.percentage,
        level,
        score,
    }
}
