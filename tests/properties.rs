use aiseo_score::readability::flesch_reading_ease;
use aiseo_score::{
    analyze_image_seo, analyze_permalink, analyze_readability, keyword_difficulty, percentage,
    status_for, status_for_percentage, ImageInput, Status, TextStatistics,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn reading_ease_stays_in_range(text in "[a-zA-Z ,.!?']{1,300}") {
        let ease = flesch_reading_ease(&TextStatistics::from_text(&text));
        prop_assert!((0.0..=100.0).contains(&ease), "ease {ease} out of range");
    }

    #[test]
    fn report_percentages_stay_in_range(text in "[a-zA-Z ,.!?\n]{0,400}") {
        let report = analyze_readability(&text);
        for value in [
            report.flesch_reading_ease,
            report.passive_voice_pct,
            report.transition_words_pct,
            report.sentence_variety,
            report.paragraph_variety,
        ] {
            prop_assert!((0.0..=100.0).contains(&value));
        }
        for grade in [report.flesch_kincaid_grade, report.gunning_fog, report.smog, report.coleman_liau, report.ari] {
            prop_assert!(grade >= 0.0);
        }
        let score = report.score();
        prop_assert!(score.earned <= score.max);
    }

    #[test]
    fn image_rubric_never_exceeds_max(
        filename in "[a-zA-Z0-9_.-]{0,30}",
        alt in proptest::option::of(".{0,200}"),
        title in proptest::option::of(".{0,40}"),
        file_size in proptest::option::of(0u64..5_000_000),
        keyword in proptest::option::of("[a-z ]{0,20}"),
    ) {
        let image = ImageInput { filename, alt, title, file_size };
        let score = analyze_image_seo(&image, keyword.as_deref());
        prop_assert_eq!(score.max, 100);
        prop_assert!(score.earned <= score.max);
        prop_assert!(score.percentage <= 100);
    }

    #[test]
    fn permalink_and_keyword_rubrics_are_bounded(slug in ".{0,80}", keyword in "[a-z ]{0,30}") {
        let permalink = analyze_permalink(&slug, Some(&keyword));
        prop_assert!(permalink.earned <= permalink.max);
        let difficulty = keyword_difficulty(&keyword);
        prop_assert!(difficulty.difficulty <= 100);
    }

    #[test]
    fn percentage_matches_bucket(earned in 0u32..=1000, max in 1u32..=1000) {
        let earned = earned.min(max);
        let pct = percentage(earned, max);
        prop_assert!(pct <= 100);
        let expected = if pct >= 80 { Status::Good } else if pct >= 50 { Status::Ok } else { Status::Poor };
        prop_assert_eq!(status_for_percentage(pct), expected);
        prop_assert_eq!(status_for(earned, max), expected);
    }
}
