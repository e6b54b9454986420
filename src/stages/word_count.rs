//! src/stages/word_count.rs
use crate::aggregator::{CountTable, SentimentWord, Shuffle};
use crate::configuration::Settings;
use crate::file_splitter::{FileSplitter, InputSplit};
use crate::functions::Reducer;
use crate::intermediate::{IntermediateOutput, PartitionedWriter};
use crate::mappers::SentimentWordCounter;
use crate::master::{MapOutput, Master};
use crate::normalizer::TextNormalizer;
use crate::record::RecordParser;
use crate::reducers::Adder;
use crate::stopwords::StopwordSet;
use crate::worker::{MapStats, Worker};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCountReport {
    pub map_tasks: usize,
    pub lines_read: u64,
    pub lines_skipped: u64,
    pub distinct_keys: usize,
    pub intermediate_files: Vec<PathBuf>,
}

/// Stage one: corpus lines in, `(sentiment, word) -> count` partitions out.
pub struct WordCountStage {
    input_path: PathBuf,
    intermediate_path: PathBuf,
    split_dir: PathBuf,
    split_size_in_bytes: u64,
    workers: usize,
    partitions: usize,
    combine: bool,
    mapper: Arc<SentimentWordCounter>,
}

impl WordCountStage {
    pub fn new(settings: &Settings, stopwords: Arc<StopwordSet>, split_dir: &Path) -> Self {
        let pipeline = &settings.pipeline;
        let mapper = SentimentWordCounter::new(
            RecordParser::new(&pipeline.header),
            TextNormalizer::new(stopwords),
        );
        Self {
            input_path: pipeline.input_path.clone(),
            intermediate_path: pipeline.intermediate_path.clone(),
            split_dir: split_dir.to_path_buf(),
            split_size_in_bytes: pipeline.split_size_in_bytes,
            workers: settings.cluster.workers.get(),
            partitions: pipeline.partitions.get(),
            combine: pipeline.combine,
            mapper: Arc::new(mapper),
        }
    }

    #[tracing::instrument(
        name = "Word count stage",
        skip_all,
        fields(input = %self.input_path.display())
    )]
    pub async fn run(&self) -> Result<WordCountReport, anyhow::Error> {
        let splits = self.split_input().await?;
        let workers = (0..self.workers).map(|_| Worker::new()).collect();
        let mut master = Master::new(workers, splits)?;
        let map_tasks = master.task_count();

        let mut shuffle = Shuffle::new();
        let stats = if self.combine {
            let outputs = master
                .run_map_phase(Arc::clone(&self.mapper), CountTable::new)
                .await?;
            shuffle_outputs(outputs, &mut shuffle)
        } else {
            let outputs = master
                .run_map_phase(Arc::clone(&self.mapper), Vec::<(SentimentWord, u64)>::new)
                .await?;
            shuffle_outputs(outputs, &mut shuffle)
        };
        // Every worker has been joined, so each key now carries all of its partial counts.
        let distinct_keys = shuffle.key_count();

        let intermediate_path = self.intermediate_path.clone();
        let partitions = self.partitions;
        let output = tokio::task::spawn_blocking(move || {
            reduce_counts(shuffle, &intermediate_path, partitions)
        })
        .await
        .context("Reduce task panicked")??;

        if stats.lines_skipped > 0 {
            tracing::warn!(
                skipped = stats.lines_skipped,
                "Discarded malformed records"
            );
        }
        tracing::info!(
            lines_read = stats.lines_read,
            distinct_keys,
            entries_written = output.entries_written,
            "Word count stage complete"
        );

        Ok(WordCountReport {
            map_tasks,
            lines_read: stats.lines_read,
            lines_skipped: stats.lines_skipped,
            distinct_keys,
            intermediate_files: output.files,
        })
    }

    async fn split_input(&self) -> Result<Vec<InputSplit>, anyhow::Error> {
        std::fs::create_dir_all(&self.split_dir).with_context(|| {
            format!("Failed to create split directory {}", self.split_dir.display())
        })?;
        let splitter = FileSplitter::new(
            self.input_path.clone(),
            self.split_size_in_bytes,
            "split".to_string(),
            self.split_dir.clone(),
        );
        tokio::task::spawn_blocking(move || splitter.split())
            .await
            .context("Split task panicked")?
    }
}

fn shuffle_outputs<E>(
    outputs: Vec<MapOutput<E>>,
    shuffle: &mut Shuffle<SentimentWord, u64>,
) -> MapStats
where
    E: IntoIterator<Item = (SentimentWord, u64)>,
{
    let mut stats = MapStats::default();
    for output in outputs {
        tracing::debug!(
            worker_id = %output.worker_id.id(),
            lines_read = output.stats.lines_read,
            "Shuffling map output"
        );
        stats.merge(output.stats);
        shuffle.extend(output.emitter);
    }
    stats
}

fn reduce_counts(
    shuffle: Shuffle<SentimentWord, u64>,
    intermediate_path: &Path,
    partitions: usize,
) -> Result<IntermediateOutput, anyhow::Error> {
    let mut writer = PartitionedWriter::create(intermediate_path, partitions)?;
    let mut entries = Vec::with_capacity(1);
    for (key, values) in shuffle.into_groups() {
        Adder.reduce(&key, values.into_iter(), &mut entries);
        for entry in entries.drain(..) {
            writer.write(&entry)?;
        }
    }
    writer.finish()
}
