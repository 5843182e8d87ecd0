use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("aiseo-score").unwrap()
}

#[test]
fn readability_reads_stdin() {
    cli()
        .arg("readability")
        .write_stdin("The cat sat on the mat. It was happy.")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"flesch_reading_ease\": 100.0"))
        .stdout(predicate::str::contains("\"sentence_count\": 2"));
}

#[test]
fn readability_strips_html() {
    cli()
        .args(["readability", "--html"])
        .write_stdin("<p>The cat sat.</p><p>It was <em>happy</em>.</p>")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"paragraph_count\": 2"));
}

#[test]
fn keyword_levels() {
    cli()
        .args(["keyword", "shoes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"level\": \"hard\""));
}

#[test]
fn permalink_suggestion() {
    cli()
        .args([
            "permalink",
            "--suggest",
            "How to Train Your Dog in 10 Days",
            "--keyword",
            "train dog",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"slug\": \"train-dog-10-days\""));
}

#[test]
fn permalink_requires_a_slug() {
    cli().arg("permalink").assert().failure();
}

#[test]
fn image_scores_from_flags() {
    cli()
        .args(["image", "--filename", "IMG_0001.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"poor\""));
}

#[test]
fn missing_file_fails() {
    cli()
        .args(["summary", "definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("definitely/not/here.txt"));
}
