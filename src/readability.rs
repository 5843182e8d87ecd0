use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::rubric::{RubricScore, ScoreFactor};
use crate::text::{self, ratio, TextStatistics};

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

struct Hyperparameters {
    sentence_variety_k: f64,
    paragraph_variety_k: f64,
    score_cap: f64,
    // Readability rubric
    ease_points: u32,
    ease_good_min: f64,
    ease_ok_min: f64,
    passive_points: u32,
    passive_good_max: f64,
    passive_ok_max: f64,
    transition_points: u32,
    transition_good_min: f64,
    transition_ok_min: f64,
    variety_points: u32,
    variety_partial_points: u32,
    variety_good_min: f64,
    variety_ok_min: f64,
}

static HP: Hyperparameters = Hyperparameters {
    sentence_variety_k: 2.0,
    paragraph_variety_k: 0.1,
    score_cap: 100.0,
    ease_points: 30,
    ease_good_min: 60.0,
    ease_ok_min: 30.0,
    passive_points: 20,
    passive_good_max: 10.0,
    passive_ok_max: 20.0,
    transition_points: 20,
    transition_good_min: 30.0,
    transition_ok_min: 20.0,
    variety_points: 15,
    variety_partial_points: 7,
    variety_good_min: 50.0,
    variety_ok_min: 25.0,
};

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

// A be-verb directly followed by a participle-looking word. Misses irregular
// participles ("was made") and flags adjectives ("is golden"); kept that way.
static PASSIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:am|is|are|was|were|be|been|being)\s+\w+(?:ed|en|ne|wn)\b").unwrap()
});

static TRANSITION_RE: Lazy<Regex> = Lazy::new(|| {
    let words = [
        // Phrases
        "as a result",
        "for example",
        "for instance",
        "in addition",
        "in conclusion",
        "in contrast",
        "in fact",
        "in other words",
        "in particular",
        "in summary",
        "on the other hand",
        "to summarize",
        "above all",
        "after all",
        "even though",
        "first of all",
        "most importantly",
        "as well as",
        "due to",
        "such as",
        "to illustrate",
        // Single words
        "accordingly",
        "additionally",
        "afterward",
        "also",
        "although",
        "because",
        "besides",
        "consequently",
        "conversely",
        "finally",
        "first",
        "firstly",
        "furthermore",
        "hence",
        "however",
        "indeed",
        "instead",
        "likewise",
        "meanwhile",
        "moreover",
        "nevertheless",
        "next",
        "nonetheless",
        "otherwise",
        "second",
        "secondly",
        "similarly",
        "specifically",
        "still",
        "then",
        "therefore",
        "thus",
        "whereas",
    ];
    let alt = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)\\b(?:{alt})\\b")).unwrap()
});

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn has_text(stats: &TextStatistics) -> bool {
    stats.word_count > 0 && stats.sentence_count > 0
}

pub fn flesch_reading_ease(stats: &TextStatistics) -> f64 {
    if !has_text(stats) {
        return 0.0;
    }
    let score =
        206.835 - 1.015 * stats.words_per_sentence() - 84.6 * stats.syllables_per_word();
    round1(score.clamp(0.0, HP.score_cap))
}

pub fn flesch_kincaid_grade(stats: &TextStatistics) -> f64 {
    if !has_text(stats) {
        return 0.0;
    }
    let grade = 0.39 * stats.words_per_sentence() + 11.8 * stats.syllables_per_word() - 15.59;
    round1(grade.max(0.0))
}

pub fn gunning_fog(stats: &TextStatistics) -> f64 {
    if !has_text(stats) {
        return 0.0;
    }
    let complex_pct = 100.0 * ratio(stats.complex_word_count, stats.word_count);
    round1((0.4 * (stats.words_per_sentence() + complex_pct)).max(0.0))
}

pub fn smog(stats: &TextStatistics) -> f64 {
    if !has_text(stats) {
        return 0.0;
    }
    let polysyllables = stats.complex_word_count as f64 * (30.0 / stats.sentence_count as f64);
    round1((1.043 * polysyllables.sqrt() + 3.1291).max(0.0))
}

pub fn coleman_liau(stats: &TextStatistics) -> f64 {
    if !has_text(stats) {
        return 0.0;
    }
    let l = stats.characters_per_word() * 100.0;
    let s = ratio(stats.sentence_count, stats.word_count) * 100.0;
    round1((0.0588 * l - 0.296 * s - 15.8).max(0.0))
}

pub fn automated_readability_index(stats: &TextStatistics) -> f64 {
    if !has_text(stats) {
        return 0.0;
    }
    let ari = 4.71 * stats.characters_per_word() + 0.5 * stats.words_per_sentence() - 21.43;
    round1(ari.max(0.0))
}

/// Share of sentences (0-100) matching `be-verb + participle`.
pub fn passive_voice_percentage(text: &str) -> f64 {
    let sentences = text::split_sentences(text);
    let passive = sentences.iter().filter(|s| PASSIVE_RE.is_match(s)).count();
    round1(100.0 * ratio(passive, sentences.len()))
}

/// Share of sentences (0-100) containing at least one transition word.
pub fn transition_word_percentage(text: &str) -> f64 {
    let sentences = text::split_sentences(text);
    let with_transition = sentences
        .iter()
        .filter(|s| TRANSITION_RE.is_match(s))
        .count();
    round1(100.0 * ratio(with_transition, sentences.len()))
}

/// Population variance; 0 for an empty slice.
pub fn population_variance(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

/// `min(100, variance * k)`.
pub fn variety_score(variance: f64, k: f64) -> f64 {
    round1((variance * k).clamp(0.0, HP.score_cap))
}

fn unit_word_counts(units: &[&str]) -> Vec<usize> {
    units.iter().map(|u| text::count_words(u)).collect()
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityReport {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub smog: f64,
    pub coleman_liau: f64,
    pub ari: f64,
    pub passive_voice_pct: f64,
    pub transition_words_pct: f64,
    pub sentence_variance: f64,
    pub sentence_variety: f64,
    pub paragraph_variance: f64,
    pub paragraph_variety: f64,
    pub statistics: TextStatistics,
}

#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze_readability(text: &str) -> ReadabilityReport {
    let stats = TextStatistics::from_text(text);
    tracing::debug!(
        words = stats.word_count,
        sentences = stats.sentence_count,
        syllables = stats.syllable_count,
        "text statistics"
    );

    let sentence_counts = unit_word_counts(&text::split_sentences(text));
    let paragraph_counts = unit_word_counts(&text::split_paragraphs(text));
    let sentence_variance = population_variance(&sentence_counts);
    let paragraph_variance = population_variance(&paragraph_counts);

    ReadabilityReport {
        flesch_reading_ease: flesch_reading_ease(&stats),
        flesch_kincaid_grade: flesch_kincaid_grade(&stats),
        gunning_fog: gunning_fog(&stats),
        smog: smog(&stats),
        coleman_liau: coleman_liau(&stats),
        ari: automated_readability_index(&stats),
        passive_voice_pct: passive_voice_percentage(text),
        transition_words_pct: transition_word_percentage(text),
        sentence_variance: round1(sentence_variance),
        sentence_variety: variety_score(sentence_variance, HP.sentence_variety_k),
        paragraph_variance: round1(paragraph_variance),
        paragraph_variety: variety_score(paragraph_variance, HP.paragraph_variety_k),
        statistics: stats,
    }
}

impl ReadabilityReport {
    /// Readability checklist out of 100. Empty text earns nothing.
    pub fn score(&self) -> RubricScore {
        if self.statistics.is_empty() {
            return RubricScore::from_factors(vec![ScoreFactor::check(
                "content",
                false,
                100,
                "No readable text found",
            )]);
        }

        let fre = self.flesch_reading_ease;
        let ease = if fre >= HP.ease_good_min {
            ScoreFactor::graded(
                "reading_ease",
                HP.ease_points,
                HP.ease_points,
                format!("Flesch reading ease {fre:.1} is easy to read"),
            )
        } else if fre >= HP.ease_ok_min {
            ScoreFactor::graded(
                "reading_ease",
                HP.ease_points / 2,
                HP.ease_points,
                format!("Flesch reading ease {fre:.1} is fairly difficult"),
            )
        } else {
            ScoreFactor::graded(
                "reading_ease",
                0,
                HP.ease_points,
                format!("Flesch reading ease {fre:.1} is very difficult"),
            )
        };

        let passive = self.passive_voice_pct;
        let passive_earned = if passive <= HP.passive_good_max {
            HP.passive_points
        } else if passive <= HP.passive_ok_max {
            HP.passive_points / 2
        } else {
            0
        };

        let transitions = self.transition_words_pct;
        let transition_earned = if transitions >= HP.transition_good_min {
            HP.transition_points
        } else if transitions >= HP.transition_ok_min {
            HP.transition_points / 2
        } else {
            0
        };

        RubricScore::from_factors(vec![
            ease,
            ScoreFactor::graded(
                "passive_voice",
                passive_earned,
                HP.passive_points,
                format!("{passive:.1}% of sentences use passive voice"),
            ),
            ScoreFactor::graded(
                "transition_words",
                transition_earned,
                HP.transition_points,
                format!("{transitions:.1}% of sentences contain transition words"),
            ),
            variety_factor("sentence_variety", "Sentence", self.sentence_variety),
            variety_factor("paragraph_variety", "Paragraph", self.paragraph_variety),
        ])
    }
}

fn variety_factor(name: &str, label: &str, variety: f64) -> ScoreFactor {
    let earned = if variety >= HP.variety_good_min {
        HP.variety_points
    } else if variety >= HP.variety_ok_min {
        HP.variety_partial_points
    } else {
        0
    };
    ScoreFactor::graded(
        name,
        earned,
        HP.variety_points,
        format!("{label} length variety score {variety:.1}"),
    )
}
