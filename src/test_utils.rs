//! src/test_utils.rs
use crate::configuration::{ClusterSettings, PipelineSettings, Settings};
use crate::file_splitter::InputSplit;
use crate::record::DEFAULT_HEADER;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

pub fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = lines.join("\n");
    contents.push('\n');
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// `count` single-record splits, each holding a different positive word.
pub fn make_splits(dir: &Path, count: usize) -> Vec<InputSplit> {
    const WORDS: [&str; 8] = [
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
    ];
    (0..count)
        .map(|i| {
            let line = format!("\"{}\",1", WORDS[i % WORDS.len()]);
            let path = write_lines(dir, &format!("split_{i}"), &[&line]);
            InputSplit::new(&path)
        })
        .collect()
}

/// Settings rooted in `dir`, small enough to exercise several splits and workers.
pub fn test_settings(dir: &Path, input: &Path) -> Settings {
    Settings {
        pipeline: PipelineSettings {
            input_path: input.to_path_buf(),
            stopwords_path: dir.join("stopwords.txt"),
            intermediate_path: dir.join("intermediate"),
            output_path: dir.join("final"),
            top_k: NonZeroUsize::new(100).expect("non-zero k"),
            header: DEFAULT_HEADER.to_string(),
            combine: true,
            partitions: NonZeroUsize::new(2).expect("non-zero partitions"),
            split_size_in_bytes: 1024,
        },
        cluster: ClusterSettings {
            workers: NonZeroUsize::new(2).expect("non-zero workers"),
        },
    }
}
