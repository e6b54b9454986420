//! tests/api/pipeline.rs
use crate::helpers::{TestPipeline, test_data_dir};
use claims::{assert_matches, assert_ok};
use sentiment_topk::error::PipelineError;
use sentiment_topk::intermediate::SUCCESS_MARKER;
use sentiment_topk::job::SentimentJob;
use sentiment_topk::sentiment::Sentiment;
use sentiment_topk::stages::TopKStage;
use sentiment_topk::top_k::RankedWord;

#[tokio::test]
async fn should_rank_words_per_sentiment_end_to_end() {
    // Arrange
    let pipeline = TestPipeline::new(
        &[
            "Text,Sentiment",
            "\"great quarterly profit report\",1",
            "\"profit, and growth\",1",
            "\"the the the\",-1",
            "\"Losses mount; profit warning issued\",-1",
        ],
        10,
    );

    // Act
    let report = assert_ok!(SentimentJob::new(pipeline.settings.clone()).run().await);

    // Assert
    assert_eq!(report.word_count.lines_skipped, 0);
    assert_eq!(
        pipeline.ranking("positive_top10.txt"),
        "Word\tCount\nprofit\t2\ngreat\t1\ngrowth\t1\nquarterly\t1\nreport\t1\n"
    );
    assert_eq!(
        pipeline.ranking("negative_top10.txt"),
        "Word\tCount\nissued\t1\nlosses\t1\nmount\t1\nprofit\t1\nwarning\t1\n"
    );
    assert!(pipeline.settings.pipeline.intermediate_path.join(SUCCESS_MARKER).exists());
    assert!(pipeline.settings.pipeline.output_path.join(SUCCESS_MARKER).exists());
}

#[tokio::test]
async fn should_break_count_ties_by_word_and_drop_the_rest() {
    // Arrange
    let mut lines = vec!["Text,Sentiment"];
    lines.extend(std::iter::repeat_n("\"profit growth\",1", 50));
    lines.extend(std::iter::repeat_n("\"loss\",1", 10));
    let pipeline = TestPipeline::new(&lines, 2);

    // Act
    let report = assert_ok!(SentimentJob::new(pipeline.settings.clone()).run().await);

    // Assert
    assert_eq!(
        report.top_k.rankings[0].words,
        vec![RankedWord::new("growth", 50), RankedWord::new("profit", 50)]
    );
    assert_eq!(report.top_k.rankings[1].sentiment, Sentiment::Negative);
    assert!(report.top_k.rankings[1].words.is_empty());
    assert_eq!(pipeline.ranking("negative_top2.txt"), "Word\tCount\n");
}

#[tokio::test]
async fn should_count_the_bundled_corpus_and_skip_malformed_lines() {
    // Arrange
    let pipeline = TestPipeline::from_file(&test_data_dir().join("small_corpus.csv"), 1);

    // Act
    let report = assert_ok!(SentimentJob::new(pipeline.settings.clone()).run().await);

    // Assert
    assert!(!report.stopwords_degraded);
    assert!(report.word_count.map_tasks > 1);
    assert_eq!(report.word_count.lines_skipped, 2);
    assert_eq!(pipeline.ranking("positive_top1.txt"), "Word\tCount\nprofit\t4\n");
    assert_eq!(pipeline.ranking("negative_top1.txt"), "Word\tCount\nloss\t3\n");
}

#[tokio::test]
async fn empty_input_should_produce_header_only_rankings() {
    // Arrange
    let pipeline = TestPipeline::new(&["Text,Sentiment"], 5);

    // Act
    let report = assert_ok!(SentimentJob::new(pipeline.settings.clone()).run().await);

    // Assert
    assert_eq!(report.word_count.distinct_keys, 0);
    assert_eq!(pipeline.ranking("positive_top5.txt"), "Word\tCount\n");
    assert_eq!(pipeline.ranking("negative_top5.txt"), "Word\tCount\n");
}

#[tokio::test]
async fn should_replace_stale_output_from_a_previous_run() {
    // Arrange
    let first = TestPipeline::new(&["Text,Sentiment", "\"record profit\",1"], 5);
    assert_ok!(SentimentJob::new(first.settings.clone()).run().await);
    let mut settings = first.settings.clone();
    let rerun_input = first.dir.path().join("rerun.csv");
    std::fs::write(&rerun_input, "Text,Sentiment\n\"heavy loss\",-1\n")
        .expect("Failed to write input");
    settings.pipeline.input_path = rerun_input;

    // Act
    assert_ok!(SentimentJob::new(settings).run().await);

    // Assert
    assert_eq!(first.ranking("positive_top5.txt"), "Word\tCount\n");
    assert_eq!(first.ranking("negative_top5.txt"), "Word\tCount\nheavy\t1\nloss\t1\n");
}

#[tokio::test]
async fn rerunning_with_another_k_should_leave_one_ranking_per_sentiment() {
    // Arrange
    let first = TestPipeline::new(&["Text,Sentiment", "\"record profit\",1"], 5);
    assert_ok!(SentimentJob::new(first.settings.clone()).run().await);
    let mut settings = first.settings.clone();
    let rerun_input = first.dir.path().join("rerun.csv");
    std::fs::write(&rerun_input, "Text,Sentiment\n\"heavy loss\",-1\n")
        .expect("Failed to write input");
    settings.pipeline.input_path = rerun_input;
    settings.pipeline.top_k = std::num::NonZeroUsize::new(3).expect("non-zero k");

    // Act
    assert_ok!(SentimentJob::new(settings).run().await);

    // Assert
    let mut names: Vec<String> = std::fs::read_dir(&first.settings.pipeline.output_path)
        .expect("Failed to list output")
        .map(|entry| {
            entry
                .expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    assert_eq!(names, vec!["_SUCCESS", "negative_top3.txt", "positive_top3.txt"]);
    assert_eq!(first.ranking("positive_top3.txt"), "Word\tCount\n");
    assert_eq!(first.ranking("negative_top3.txt"), "Word\tCount\nheavy\t1\nloss\t1\n");
}

#[tokio::test]
async fn top_k_stage_should_not_run_before_word_count_completes() {
    // Arrange
    let pipeline = TestPipeline::new(&["Text,Sentiment", "\"profit\",1"], 5);
    std::fs::create_dir_all(&pipeline.settings.pipeline.intermediate_path)
        .expect("Failed to create intermediate dir");

    // Act
    let result = TopKStage::new(&pipeline.settings).run().await;

    // Assert
    assert_matches!(result, Err(PipelineError::IncompleteStage(_)));
    assert!(!pipeline.settings.pipeline.output_path.exists());
}

#[tokio::test]
async fn missing_input_should_fail_without_writing_output() {
    // Arrange
    let pipeline = TestPipeline::from_file(&test_data_dir().join("does_not_exist.csv"), 5);

    // Act
    let result = SentimentJob::new(pipeline.settings.clone()).run().await;

    // Assert
    assert_matches!(result, Err(PipelineError::MissingInput(_)));
    assert!(!pipeline.settings.pipeline.output_path.exists());
}
