//! src/error.rs
use std::path::PathBuf;

#[derive(thiserror::Error)]
pub enum PipelineError {
    #[error("Input file doesn't exist: {0}")]
    MissingInput(PathBuf),
    #[error("Intermediate output at {0} was not marked complete")]
    IncompleteStage(PathBuf),
    #[error("Word count stage failed")]
    WordCountStage(#[source] anyhow::Error),
    #[error("Top-K stage failed")]
    TopKStage(#[source] anyhow::Error),
}

impl std::fmt::Debug for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

pub fn error_chain_fmt(
    f: &mut std::fmt::Formatter<'_>,
    e: &impl std::error::Error,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
