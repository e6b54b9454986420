//! src/intermediate.rs
//!
//! On-disk hand-off between the word count stage and the top-K stage.
//!
//! The artifact is a directory holding `part-r-NNNNN` files plus a `_SUCCESS`
//! marker that is written last. Each line is `word<TAB>count<TAB>sentiment`.
use crate::aggregator::CountEntry;
use crate::sentiment::{Sentiment, SentimentParseError};
use anyhow::Context;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

pub const SUCCESS_MARKER: &str = "_SUCCESS";
const PARTITION_PREFIX: &str = "part-r-";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum IntermediateError {
    #[error("expected 3 tab-separated fields, found {0}")]
    FieldCount(usize),
    #[error("empty word field")]
    EmptyWord,
    #[error("invalid count '{value}'")]
    InvalidCount {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    InvalidSentiment(#[from] SentimentParseError),
}

pub fn encode(entry: &CountEntry) -> String {
    format!("{}\t{}\t{}", entry.word, entry.count, entry.sentiment)
}

pub fn decode(line: &str) -> Result<CountEntry, IntermediateError> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    let &[word, count, sentiment] = &fields[..] else {
        return Err(IntermediateError::FieldCount(fields.len()));
    };
    if word.is_empty() {
        return Err(IntermediateError::EmptyWord);
    }
    let count = count
        .parse::<u64>()
        .map_err(|source| IntermediateError::InvalidCount {
            value: count.to_string(),
            source,
        })?;
    let sentiment = sentiment.parse::<Sentiment>()?;

    Ok(CountEntry {
        sentiment,
        word: word.to_string(),
        count,
    })
}

pub fn partition_file_name(partition: usize) -> String {
    format!("{PARTITION_PREFIX}{partition:05}")
}

/// Writes count entries across a fixed number of partition files.
pub struct PartitionedWriter {
    output_dir: PathBuf,
    writers: Vec<BufWriter<File>>,
    entries_written: u64,
}

impl PartitionedWriter {
    /// Prepares `output_dir`, replacing partition files and the marker left by
    /// a previous run. Every partition file is created up front so an empty
    /// stage still leaves a complete, empty artifact behind.
    pub fn create(output_dir: &Path, partition_count: usize) -> Result<Self, anyhow::Error> {
        create_dir_all(output_dir).with_context(|| {
            format!(
                "Failed to create intermediate directory {}",
                output_dir.display()
            )
        })?;
        remove_stale_outputs(output_dir)?;

        let mut writers = Vec::with_capacity(partition_count);
        for partition in 0..partition_count.max(1) {
            let path = output_dir.join(partition_file_name(partition));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create partition file {}", path.display()))?;
            writers.push(BufWriter::with_capacity(8192, file));
        }

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            writers,
            entries_written: 0,
        })
    }

    pub fn get_partition(&self, entry: &CountEntry) -> usize {
        let mut hash = 0usize;
        for byte in entry.sentiment.label().bytes().chain(entry.word.bytes()) {
            hash = hash.wrapping_mul(31).wrapping_add(byte as usize);
        }
        hash % self.writers.len()
    }

    pub fn write(&mut self, entry: &CountEntry) -> Result<(), anyhow::Error> {
        let partition = self.get_partition(entry);
        let writer = &mut self.writers[partition];
        writeln!(writer, "{}", encode(entry))
            .with_context(|| format!("Failed to write to partition {partition}"))?;
        self.entries_written += 1;
        Ok(())
    }

    /// Flushes every partition, then writes the success marker.
    pub fn finish(self) -> Result<IntermediateOutput, anyhow::Error> {
        let mut files = Vec::with_capacity(self.writers.len());
        for (partition, mut writer) in self.writers.into_iter().enumerate() {
            writer
                .flush()
                .with_context(|| format!("Failed to flush partition {partition}"))?;
            files.push(self.output_dir.join(partition_file_name(partition)));
        }
        write_success_marker(&self.output_dir)?;

        Ok(IntermediateOutput {
            files,
            entries_written: self.entries_written,
        })
    }
}

#[derive(Debug, Clone)]
pub struct IntermediateOutput {
    pub files: Vec<PathBuf>,
    pub entries_written: u64,
}

pub fn is_complete(dir: &Path) -> bool {
    dir.join(SUCCESS_MARKER).is_file()
}

pub fn write_success_marker(dir: &Path) -> Result<(), anyhow::Error> {
    let marker = dir.join(SUCCESS_MARKER);
    File::create(&marker)
        .with_context(|| format!("Failed to write success marker {}", marker.display()))?;
    Ok(())
}

/// Partition files in `dir`, sorted by name.
pub fn partition_files(dir: &Path) -> Result<Vec<PathBuf>, anyhow::Error> {
    let mut files = vec![];
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list intermediate directory {}", dir.display()))?
    {
        let entry = entry.context("Failed to read intermediate directory entry")?;
        let is_partition = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(PARTITION_PREFIX));
        if is_partition && entry.path().is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn remove_stale_outputs(dir: &Path) -> Result<(), anyhow::Error> {
    let marker = dir.join(SUCCESS_MARKER);
    if marker.exists() {
        std::fs::remove_file(&marker).context("Failed to remove stale success marker")?;
    }
    for file in partition_files(dir)? {
        std::fs::remove_file(&file)
            .with_context(|| format!("Failed to remove stale partition {}", file.display()))?;
    }
    Ok(())
}
