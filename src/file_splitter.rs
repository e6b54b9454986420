//! src/file_splitter.rs
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A line-aligned slice of an input file, processed by one map task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSplit {
    id: Uuid,
    path: PathBuf,
}

impl InputSplit {
    pub fn new(path: &Path) -> Self {
        InputSplit {
            id: Uuid::new_v4(),
            path: path.to_path_buf(),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub struct FileSplitter {
    split_size_in_bytes: u64,
    path: PathBuf,
    out_path: PathBuf,
    out_file_name: String,
}

impl FileSplitter {
    pub fn new(
        path: PathBuf,
        split_size_in_bytes: u64,
        out_file_name: String,
        out_path: PathBuf,
    ) -> Self {
        FileSplitter {
            split_size_in_bytes,
            path,
            out_file_name,
            out_path,
        }
    }

    /// Copies the input into split files of at most `split_size_in_bytes`
    /// each, never breaking a line. A line longer than the limit gets a split
    /// of its own. Empty input produces no splits.
    #[tracing::instrument(name = "Split input", skip(self), fields(input = %self.path.display()))]
    pub fn split(&self) -> Result<Vec<InputSplit>, anyhow::Error> {
        if !self.path.exists() {
            return Err(anyhow::anyhow!(
                "Input file doesn't exist: {}",
                self.path.display()
            ));
        }

        let in_file = File::open(&self.path).context("Failed to open input file")?;
        let mut reader = BufReader::new(in_file);
        let mut results: Vec<InputSplit> = Vec::new();
        let mut current: Option<(BufWriter<File>, PathBuf)> = None;
        let mut curr_out_file_size = 0u64;
        let mut line = Vec::new();

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .context("Failed to read line from input file")?;
            if read == 0 {
                break;
            }
            if !line.ends_with(b"\n") {
                line.push(b'\n');
            }
            let line_size = line.len() as u64;

            let full = curr_out_file_size > 0
                && line_size + curr_out_file_size > self.split_size_in_bytes;
            if full {
                if let Some((writer, path)) = current.take() {
                    results.push(self.close_out_file(writer, &path)?);
                }
                curr_out_file_size = 0;
            }

            if current.is_none() {
                current = Some(self.create_new_out_file(results.len())?);
            }
            if let Some((writer, _)) = current.as_mut() {
                writer
                    .write_all(&line)
                    .context("Failed to write line to out file")?;
            }
            curr_out_file_size += line_size;
        }

        if let Some((writer, path)) = current.take() {
            results.push(self.close_out_file(writer, &path)?);
        }
        tracing::debug!(splits = results.len(), "Split input file");
        Ok(results)
    }

    fn create_new_out_file(
        &self,
        suffix: usize,
    ) -> Result<(BufWriter<File>, PathBuf), anyhow::Error> {
        let name = format!("{}_{suffix}", self.out_file_name);
        let path = self.out_path.join(name);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file at: {}", path.display()))?;
        Ok((BufWriter::new(file), path))
    }

    fn close_out_file(
        &self,
        mut writer: BufWriter<File>,
        path: &Path,
    ) -> Result<InputSplit, anyhow::Error> {
        writer
            .flush()
            .with_context(|| format!("Failed to flush split {}", path.display()))?;
        Ok(InputSplit::new(path))
    }
}
