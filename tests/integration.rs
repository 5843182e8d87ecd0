use aiseo_score::error::read_input;
use aiseo_score::readability::{
    automated_readability_index, coleman_liau, flesch_kincaid_grade, flesch_reading_ease,
    gunning_fog, passive_voice_percentage, smog, transition_word_percentage,
};
use aiseo_score::text::{
    count_characters, count_complex_words, count_paragraphs, count_sentences, count_syllables,
    count_words,
};
use aiseo_score::{analyze_readability, html_to_text, Error, Status, TextStatistics};

#[test]
fn short_passage_statistics() {
    let text = "The cat sat on the mat. It was happy.";
    let stats = TextStatistics::from_text(text);
    assert_eq!(stats.sentence_count, 2);
    assert_eq!(stats.word_count, 9);
    assert_eq!(stats.syllable_count, 10);
    assert_eq!(stats.character_count, 27);
    assert_eq!(stats.complex_word_count, 0);
    assert_eq!(stats.paragraph_count, 1);
}

#[test]
fn short_passage_report_is_reproducible() {
    let text = "The cat sat on the mat. It was happy.";
    let report = analyze_readability(text);
    assert_eq!(report.flesch_reading_ease, 100.0);
    assert_eq!(report.flesch_kincaid_grade, 0.0);
    assert_eq!(report.gunning_fog, 1.8);
    assert_eq!(report.smog, 3.1);
    assert_eq!(report.coleman_liau, 0.0);
    assert_eq!(report.ari, 0.0);
    assert_eq!(report.passive_voice_pct, 0.0);
    assert_eq!(report.transition_words_pct, 0.0);
    assert_eq!(report.sentence_variance, 2.3);
    assert_eq!(report.sentence_variety, 4.5);
    assert_eq!(report.paragraph_variance, 0.0);
    assert_eq!(report, analyze_readability(text));
}

#[test]
fn empty_text_scores_zero() {
    let stats = TextStatistics::from_text("");
    assert_eq!(stats, TextStatistics::default());
    assert_eq!(flesch_reading_ease(&stats), 0.0);
    assert_eq!(flesch_kincaid_grade(&stats), 0.0);

    let report = analyze_readability("");
    assert_eq!(report.gunning_fog, 0.0);
    assert_eq!(report.smog, 0.0);
    assert_eq!(report.passive_voice_pct, 0.0);

    let score = report.score();
    assert_eq!(score.earned, 0);
    assert_eq!(score.max, 100);
    assert_eq!(score.status, Status::Poor);
}

#[test]
fn syllable_heuristic() {
    assert_eq!(count_syllables("the"), 1);
    assert!(count_syllables("readability") >= 3);
    assert_eq!(count_syllables("make"), 1);
    assert_eq!(count_syllables("a"), 1);
    assert_eq!(count_syllables("rhythm"), 1);
    assert_eq!(count_syllables("strengths"), 1);
    assert_eq!(count_syllables("Happy!"), 2);
    assert_eq!(count_syllables(""), 0);
    assert_eq!(count_syllables("..."), 0);
}

#[test]
fn word_and_sentence_counts() {
    assert_eq!(count_words("Hello, world! -- foo"), 3);
    assert_eq!(count_words(""), 0);
    assert_eq!(count_sentences("Wait... what?! Yes."), 3);
    assert_eq!(count_sentences("..."), 0);
    assert_eq!(count_sentences("No terminal punctuation"), 1);
    assert_eq!(count_complex_words("An extraordinary, unbelievable cat."), 2);
    assert_eq!(count_paragraphs("One here.\n\nTwo here.\n   \nThree."), 3);
}

#[test]
fn complex_words_never_raise_reading_ease() {
    let base = "The cat sat on the mat and looked at the bird";
    let mut previous = f64::MAX;
    for n in 0..8 {
        let text = format!("{base}{}.", " extraordinarily".repeat(n));
        let stats = TextStatistics::from_text(&text);
        let ease = flesch_reading_ease(&stats);
        assert!(
            ease <= previous,
            "reading ease rose from {previous} to {ease} after {n} complex words"
        );
        previous = ease;
    }
}

#[test]
fn dense_text_reads_harder() {
    let text = "The implementation of the comprehensive organizational restructuring \
                initiative necessitated the establishment of interdepartmental \
                communication protocols that facilitated the dissemination of \
                procedural documentation.";
    let report = analyze_readability(text);
    assert!(report.flesch_reading_ease < 30.0);
    assert!(report.flesch_kincaid_grade > 12.0);
    assert!(report.gunning_fog > report.flesch_kincaid_grade);
    assert!(report.statistics.complex_word_count > 5);
}

#[test]
fn detects_passive_voice() {
    let text = "The ball was thrown by the boy. The cake is eaten. She runs fast. He walked home.";
    assert_eq!(passive_voice_percentage(text), 50.0);
}

#[test]
fn passive_voice_covers_ed_and_ne_participles() {
    let text = "The wall was painted yesterday. The work is done. We left early.";
    assert_eq!(passive_voice_percentage(text), 66.7);
}

#[test]
fn detects_transition_words() {
    let text = "However, it rained. We stayed inside. For example, we read books. Then we slept.";
    assert_eq!(transition_word_percentage(text), 75.0);
}

#[test]
fn varied_sentences_raise_variety() {
    let flat = "We went out. We ate food. We came back. We went home.";
    let varied = "We went. After lunch we walked all the way down to the old harbour and back again. \
                  Then rain. Everyone in the group agreed that the afternoon had been worth every single step.";
    let flat_report = analyze_readability(flat);
    let varied_report = analyze_readability(varied);
    assert_eq!(flat_report.sentence_variety, 0.0);
    assert!(varied_report.sentence_variety > 50.0);
}

#[test]
fn readability_rubric_rewards_plain_writing() {
    let text = "First, we mix the flour. Then we add water and a pinch of salt.\n\n\
                However, the dough needs rest. So we leave it overnight on the counter while we sleep.\n\n\
                Finally, we bake it.";
    let score = analyze_readability(text).score();
    assert_eq!(score.max, 100);
    assert!(score.earned <= score.max);
    let ease = score.factor("reading_ease").unwrap();
    assert_eq!(ease.points_earned, 30);
    assert_eq!(ease.status, Status::Good);
    let transitions = score.factor("transition_words").unwrap();
    assert_eq!(transitions.points_earned, 20);
}

#[test]
fn html_is_reduced_to_paragraphs() {
    let html = "<p>Hello <strong>world</strong>.</p><p>Second&nbsp;para [gallery ids=\"1,2\"] here.</p>\
                <script>var x = 1;</script><!-- note -->";
    let text = html_to_text(html);
    assert_eq!(text, "Hello world.\n\nSecond para here.");
    assert_eq!(count_paragraphs(&text), 2);
}

#[test]
fn html_entities_decode_once() {
    assert_eq!(html_to_text("Salt &amp; pepper &amp;lt;3"), "Salt & pepper &lt;3");
}

#[test]
fn numeric_entities_decode() {
    assert_eq!(
        html_to_text("It&#8217;s a &#x201C;test&#x201D; &#999999999; &#xD800;"),
        "It\u{2019}s a \u{201C}test\u{201D} &#999999999; &#xD800;"
    );
    assert_eq!(html_to_text("Rock &#38; roll &#39;n&#039; &apos;blues&apos;"), "Rock & roll 'n' 'blues'");
    assert_eq!(html_to_text("&amp;#8217; &unknown;"), "&#8217; &unknown;");
    assert_eq!(count_characters(&html_to_text("<p>It&#8217;s</p>")), 3);
}

#[test]
fn polysyllabic_sentence_grade_levels() {
    let stats = TextStatistics::from_text(
        "Comprehensive organizational restructuring necessitated interdepartmental communication.",
    );
    assert_eq!(stats.word_count, 6);
    assert_eq!(stats.sentence_count, 1);
    assert_eq!(stats.syllable_count, 30);
    assert_eq!(stats.complex_word_count, 6);
    assert_eq!(stats.character_count, 82);

    assert_eq!(smog(&stats), 17.1);
    assert_eq!(coleman_liau(&stats), 59.6);
    assert_eq!(automated_readability_index(&stats), 45.9);
    assert_eq!(gunning_fog(&stats), 42.4);
    assert_eq!(flesch_reading_ease(&stats), 0.0);
}

#[test]
fn missing_input_file_reports_its_path() {
    let err = read_input("definitely/missing/post.txt").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("definitely/missing/post.txt"));
}

#[test]
fn json_output_is_valid() {
    let report = analyze_readability("The cat sat on the mat. It was happy.");
    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in [
        "flesch_reading_ease",
        "flesch_kincaid_grade",
        "gunning_fog",
        "smog",
        "coleman_liau",
        "ari",
        "passive_voice_pct",
        "transition_words_pct",
        "sentence_variance",
        "paragraph_variance",
        "statistics",
    ] {
        assert!(parsed.get(key).is_some(), "missing {key}");
    }
    assert_eq!(parsed["statistics"]["word_count"], 9);
}
