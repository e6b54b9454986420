//! tests/api/cli.rs
use crate::helpers::test_data_dir;
use std::process::Command;

fn sentiment_topk(dir: &std::path::Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sentiment-topk"));
    command.current_dir(dir).env("RUST_LOG", "warn");
    command
}

#[test]
fn should_exit_successfully_and_write_rankings() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let final_dir = dir.path().join("final");

    let status = sentiment_topk(dir.path())
        .arg(test_data_dir().join("small_corpus.csv"))
        .arg(test_data_dir().join("stopwords.txt"))
        .arg(dir.path().join("intermediate"))
        .arg(&final_dir)
        .arg("3")
        .status()
        .expect("Failed to launch binary");

    assert!(status.success());
    assert!(final_dir.join("positive_top3.txt").exists());
    assert!(final_dir.join("negative_top3.txt").exists());
}

#[test]
fn should_exit_with_failure_when_the_input_is_missing() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let status = sentiment_topk(dir.path())
        .arg(dir.path().join("missing.csv"))
        .arg(test_data_dir().join("stopwords.txt"))
        .arg(dir.path().join("intermediate"))
        .arg(dir.path().join("final"))
        .status()
        .expect("Failed to launch binary");

    assert!(!status.success());
    assert!(!dir.path().join("final").exists());
}

#[test]
fn should_exit_with_failure_on_a_bad_argument_list() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let status = sentiment_topk(dir.path())
        .args(["only", "two"])
        .status()
        .expect("Failed to launch binary");

    assert!(!status.success());
}
