//! src/stopwords.rs
use anyhow::Context;
use std::collections::HashSet;
use std::path::Path;

/// Lowercase words excluded from counting. Built once per run and shared
/// read-only between workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads a line-delimited word list. Lines are trimmed and lowercased;
    /// blank lines are ignored.
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read(path)
            .with_context(|| format!("Failed to read stopword list at {}", path.display()))?;
        Ok(String::from_utf8_lossy(&contents).lines().collect())
    }

    /// Like [`StopwordSet::load`], but an unreadable list degrades to an empty
    /// set. The second value is `true` when that happened.
    pub fn load_or_empty(path: &Path) -> (Self, bool) {
        match Self::load(path) {
            Ok(stopwords) => {
                tracing::info!(
                    path = %path.display(),
                    count = stopwords.len(),
                    "Loaded stopwords"
                );
                (stopwords, false)
            }
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    "Stopword list unavailable, continuing without stopword filtering"
                );
                (Self::empty(), true)
            }
        }
    }

    /// Expects an already-lowercased word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        StopwordSet { words }
    }
}
