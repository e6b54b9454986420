//! src/normalizer.rs
use crate::stopwords::StopwordSet;
use std::sync::Arc;

/// Lowercases `text` and reduces it to single-spaced runs of ASCII letters.
///
/// Every character that is neither an ASCII letter nor whitespace becomes a
/// separator, which also takes care of digits: `q3results` becomes `q results`.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut cleaned = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for c in lowered.chars() {
        if c.is_ascii_alphabetic() {
            if pending_space && !cleaned.is_empty() {
                cleaned.push(' ');
            }
            pending_space = false;
            cleaned.push(c);
        } else {
            pending_space = true;
        }
    }
    cleaned
}

#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: Arc<StopwordSet>,
}

impl TextNormalizer {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        TextNormalizer { stopwords }
    }

    /// Tokens of `text` that are longer than one letter and not stopwords.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        clean_text(text)
            .split(' ')
            .filter(|token| token.len() > 1 && !self.stopwords.contains(token))
            .map(str::to_string)
            .collect()
    }
}
