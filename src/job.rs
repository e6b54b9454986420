//! src/job.rs
use crate::configuration::Settings;
use crate::error::PipelineError;
use crate::stages::{TopKReport, TopKStage, WordCountReport, WordCountStage};
use crate::stopwords::StopwordSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub job_id: Uuid,
    pub stopwords_loaded: usize,
    pub stopwords_degraded: bool,
    pub word_count: WordCountReport,
    pub top_k: TopKReport,
}

/// Runs word counting then top-K selection, strictly in that order.
#[derive(Debug)]
pub struct SentimentJob {
    id: Uuid,
    settings: Settings,
}

impl SentimentJob {
    pub fn new(settings: Settings) -> Self {
        Self {
            id: Uuid::new_v4(),
            settings,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn work_dir(&self) -> PathBuf {
        std::env::temp_dir()
            .join("sentiment-topk")
            .join(self.id.to_string())
    }

    #[tracing::instrument(name = "Run SentimentJob", skip_all, fields(job_id = %self.id))]
    pub async fn run(&self) -> Result<JobReport, PipelineError> {
        let pipeline = &self.settings.pipeline;
        if !pipeline.input_path.is_file() {
            return Err(PipelineError::MissingInput(pipeline.input_path.clone()));
        }

        let (stopwords, stopwords_degraded) = StopwordSet::load_or_empty(&pipeline.stopwords_path);
        let stopwords_loaded = stopwords.len();

        let work_dir = self.work_dir();
        let word_count = WordCountStage::new(&self.settings, Arc::new(stopwords), &work_dir)
            .run()
            .await;
        remove_work_dir(&work_dir);
        let word_count = word_count.map_err(PipelineError::WordCountStage)?;

        let top_k = TopKStage::new(&self.settings).run().await?;

        tracing::info!(
            lines_read = word_count.lines_read,
            malformed = word_count.lines_skipped,
            distinct_keys = word_count.distinct_keys,
            output = %pipeline.output_path.display(),
            "Job finished"
        );

        Ok(JobReport {
            job_id: self.id,
            stopwords_loaded,
            stopwords_degraded,
            word_count,
            top_k,
        })
    }
}

fn remove_work_dir(work_dir: &Path) {
    if !work_dir.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(work_dir) {
        tracing::warn!(path = %work_dir.display(), error = %e, "Failed to remove split directory");
    }
}
