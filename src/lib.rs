//! Readability statistics and weighted SEO rubrics for blog content.
//!
//! Everything here is a pure function of its input: plain text goes in,
//! plain structs come out. Markup should be reduced with [`html_to_text`]
//! first; persistence and presentation belong to the caller.
//!
//! ```
//! let report = aiseo_score::analyze_readability("The cat sat on the mat. It was happy.");
//! assert_eq!(report.statistics.sentence_count, 2);
//! assert_eq!(report.score().max, 100);
//! ```

pub mod content;
pub mod error;
pub mod image;
pub mod keyword;
pub mod permalink;
pub mod readability;
pub mod rubric;
pub mod text;

pub use content::{analyze_content, unified_report, ContentAnalysis, ContentInput};
pub use error::{Error, Result};
pub use image::{analyze_image_seo, ImageInput};
pub use keyword::{keyword_difficulty, DifficultyLevel, KeywordDifficulty};
pub use permalink::{analyze_permalink, suggest_slug};
pub use readability::{analyze_readability, ReadabilityReport};
pub use rubric::{
    percentage, status_for, status_for_percentage, RubricScore, ScoreFactor, Status, StatusTally,
    UnifiedReport,
};
pub use text::{html_to_text, TextStatistics};
