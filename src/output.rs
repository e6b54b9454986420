//! src/output.rs
use crate::intermediate::{SUCCESS_MARKER, write_success_marker};
use crate::sentiment::Sentiment;
use crate::top_k::RankedWord;
use anyhow::Context;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const HEADER: &str = "Word\tCount";

/// The final top-K list of one sentiment class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentRanking {
    pub sentiment: Sentiment,
    pub words: Vec<RankedWord>,
}

impl SentimentRanking {
    pub fn empty(sentiment: Sentiment) -> Self {
        SentimentRanking {
            sentiment,
            words: vec![],
        }
    }
}

pub fn ranking_file_name(sentiment: Sentiment, k: usize) -> String {
    format!("{}_top{k}.txt", sentiment.name())
}

/// Ranking files of any K already present in `dir`.
fn ranking_files(dir: &Path) -> Result<Vec<PathBuf>, anyhow::Error> {
    let prefixes: Vec<String> = Sentiment::ALL
        .iter()
        .map(|sentiment| format!("{}_top", sentiment.name()))
        .collect();
    let mut files = vec![];
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list output directory {}", dir.display()))?
    {
        let entry = entry.context("Failed to read output directory entry")?;
        let is_ranking = entry.file_name().to_str().is_some_and(|name| {
            name.ends_with(".txt") && prefixes.iter().any(|prefix| name.starts_with(prefix))
        });
        if is_ranking && entry.path().is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}

fn remove_stale_outputs(dir: &Path) -> Result<(), anyhow::Error> {
    let marker = dir.join(SUCCESS_MARKER);
    if marker.exists() {
        std::fs::remove_file(&marker).context("Failed to remove stale success marker")?;
    }
    for file in ranking_files(dir)? {
        std::fs::remove_file(&file)
            .with_context(|| format!("Failed to remove stale ranking {}", file.display()))?;
    }
    Ok(())
}

/// Writes one two-column table per ranking, then the success marker.
///
/// Rankings and the marker left by an earlier run are removed first, so the
/// directory never mixes results of different runs.
pub fn write_rankings(
    output_dir: &Path,
    rankings: &[SentimentRanking],
    k: usize,
) -> Result<Vec<PathBuf>, anyhow::Error> {
    create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;
    remove_stale_outputs(output_dir)?;

    let mut paths = Vec::with_capacity(rankings.len());
    for ranking in rankings {
        let path = output_dir.join(ranking_file_name(ranking.sentiment, k));
        write_table(&path, &ranking.words)
            .with_context(|| format!("Failed to write ranking {}", path.display()))?;
        paths.push(path);
    }
    write_success_marker(output_dir)?;
    Ok(paths)
}

fn write_table(path: &Path, words: &[RankedWord]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{HEADER}")?;
    for word in words {
        writeln!(writer, "{}\t{}", word.word, word.count)?;
    }
    writer.flush()
}
