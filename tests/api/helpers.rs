//! tests/api/helpers.rs
use sentiment_topk::configuration::{ClusterSettings, PipelineSettings, Settings};
use sentiment_topk::record::DEFAULT_HEADER;
use sentiment_topk::telemetry::init_tracing;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    init_tracing("tests::api").expect("Failed to setup tracing");
});

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

pub struct TestPipeline {
    pub dir: tempfile::TempDir,
    pub settings: Settings,
}

impl TestPipeline {
    /// A pipeline over `lines`, with the shared stopword list and `k` words per sentiment.
    pub fn new(lines: &[&str], k: usize) -> Self {
        LazyLock::force(&TRACING);
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("input.csv");
        let mut contents = lines.join("\n");
        contents.push('\n');
        std::fs::write(&input, contents).expect("Failed to write input");
        let settings = settings_for(dir.path(), &input, k);
        Self { dir, settings }
    }

    pub fn from_file(input: &Path, k: usize) -> Self {
        LazyLock::force(&TRACING);
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = settings_for(dir.path(), input, k);
        Self { dir, settings }
    }

    pub fn ranking(&self, name: &str) -> String {
        std::fs::read_to_string(self.settings.pipeline.output_path.join(name))
            .expect("Failed to read ranking")
    }
}

fn settings_for(dir: &Path, input: &Path, k: usize) -> Settings {
    Settings {
        pipeline: PipelineSettings {
            input_path: input.to_path_buf(),
            stopwords_path: test_data_dir().join("stopwords.txt"),
            intermediate_path: dir.join("intermediate"),
            output_path: dir.join("final"),
            top_k: NonZeroUsize::new(k).expect("k must be positive"),
            header: DEFAULT_HEADER.to_string(),
            combine: true,
            partitions: NonZeroUsize::new(3).expect("non-zero partitions"),
            split_size_in_bytes: 96,
        },
        cluster: ClusterSettings {
            workers: NonZeroUsize::new(3).expect("non-zero workers"),
        },
    }
}
