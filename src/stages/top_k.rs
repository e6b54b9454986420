//! src/stages/top_k.rs
use crate::aggregator::Shuffle;
use crate::configuration::Settings;
use crate::error::PipelineError;
use crate::file_splitter::InputSplit;
use crate::functions::Reducer;
use crate::intermediate::{is_complete, partition_files};
use crate::mappers::TopKMapper;
use crate::master::Master;
use crate::output::{SentimentRanking, write_rankings};
use crate::reducers::TopKReducer;
use crate::sentiment::Sentiment;
use crate::top_k::RankedWord;
use crate::worker::{MapStats, Worker};
use anyhow::Context;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopKReport {
    pub entries_read: u64,
    pub entries_skipped: u64,
    pub rankings: Vec<SentimentRanking>,
    pub output_files: Vec<PathBuf>,
}

/// Stage two: intermediate counts in, one ranked file per sentiment out.
pub struct TopKStage {
    intermediate_path: PathBuf,
    output_path: PathBuf,
    k: NonZeroUsize,
    workers: usize,
}

impl TopKStage {
    pub fn new(settings: &Settings) -> Self {
        Self {
            intermediate_path: settings.pipeline.intermediate_path.clone(),
            output_path: settings.pipeline.output_path.clone(),
            k: settings.pipeline.top_k,
            workers: settings.cluster.workers.get(),
        }
    }

    #[tracing::instrument(name = "Top-K stage", skip_all, fields(k = self.k.get()))]
    pub async fn run(&self) -> Result<TopKReport, PipelineError> {
        if !is_complete(&self.intermediate_path) {
            return Err(PipelineError::IncompleteStage(self.intermediate_path.clone()));
        }
        self.select().await.map_err(PipelineError::TopKStage)
    }

    async fn select(&self) -> Result<TopKReport, anyhow::Error> {
        let splits = partition_files(&self.intermediate_path)?
            .iter()
            .map(|path| InputSplit::new(path))
            .collect();
        let workers = (0..self.workers).map(|_| Worker::new()).collect();
        let mut master = Master::new(workers, splits)?;

        let mut shuffle = Shuffle::<Sentiment, RankedWord>::new();
        let mut stats = MapStats::default();
        for output in master
            .run_map_phase(Arc::new(TopKMapper), Shuffle::<Sentiment, RankedWord>::new)
            .await?
        {
            tracing::debug!(
                worker_id = %output.worker_id.id(),
                entries = output.stats.lines_read,
                "Shuffling map output"
            );
            stats.merge(output.stats);
            shuffle.merge(output.emitter);
        }
        if stats.lines_skipped > 0 {
            tracing::warn!(
                skipped = stats.lines_skipped,
                "Skipped corrupt intermediate entries"
            );
        }

        // All partitions are mapped, so every sentiment group is complete.
        let mut groups: HashMap<Sentiment, Vec<RankedWord>> = shuffle.into_groups().collect();
        let mut handles = Vec::with_capacity(Sentiment::ALL.len());
        for sentiment in Sentiment::ALL {
            let values = groups.remove(&sentiment).unwrap_or_default();
            let reducer = TopKReducer::new(self.k);
            handles.push(tokio::task::spawn_blocking(move || {
                let mut rankings = Vec::with_capacity(1);
                reducer.reduce(&sentiment, values.into_iter(), &mut rankings);
                rankings
                    .pop()
                    .unwrap_or_else(|| SentimentRanking::empty(sentiment))
            }));
        }
        let mut rankings = Vec::with_capacity(handles.len());
        for handle in handles {
            rankings.push(handle.await.context("Selection task panicked")?);
        }

        let output_path = self.output_path.clone();
        let k = self.k.get();
        let to_write = rankings.clone();
        let output_files =
            tokio::task::spawn_blocking(move || write_rankings(&output_path, &to_write, k))
                .await
                .context("Output task panicked")??;

        for ranking in &rankings {
            tracing::info!(
                sentiment = ranking.sentiment.name(),
                words = ranking.words.len(),
                "Selected top words"
            );
        }

        Ok(TopKReport {
            entries_read: stats.lines_read - stats.lines_skipped,
            entries_skipped: stats.lines_skipped,
            rankings,
            output_files,
        })
    }
}
