//! src/record.rs
//!
//! Parsing of corpus lines of the shape `"<text>",<sentiment>` or
//! `<text>,<sentiment>`.
//!
//! The text field may be wrapped in one layer of double quotes and may contain
//! commas inside those quotes. Doubled quotes (`""`) are *not* unescaped: a
//! quoted field is only stripped of its outermost pair.
use crate::sentiment::{Sentiment, SentimentParseError};

pub const DEFAULT_HEADER: &str = "Text,Sentiment";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    text: String,
    sentiment: Sentiment,
}

impl Record {
    pub fn new(text: &str, sentiment: Sentiment) -> Self {
        Record {
            text: text.to_string(),
            sentiment,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("no unquoted comma separates text from sentiment")]
    MissingDelimiter,
    #[error(transparent)]
    InvalidSentiment(#[from] SentimentParseError),
}

#[derive(Debug, Clone)]
pub struct RecordParser {
    header: String,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER)
    }
}

impl RecordParser {
    pub fn new(header: &str) -> Self {
        RecordParser {
            header: header.trim().to_string(),
        }
    }

    /// `Ok(None)` for lines that carry no record (blank or header),
    /// `Err` for lines that should have carried one but are malformed.
    pub fn parse(&self, line: &str) -> Result<Option<Record>, RecordError> {
        let line = line.trim();
        if line.is_empty() || line == self.header {
            return Ok(None);
        }

        let split_at = first_unquoted_comma(line).ok_or(RecordError::MissingDelimiter)?;
        let text = strip_one_quote_layer(line[..split_at].trim());
        let sentiment = line[split_at + 1..].trim().parse::<Sentiment>()?;

        Ok(Some(Record::new(text, sentiment)))
    }
}

/// Parses with the default header, dropping malformed lines.
pub fn parse_record(line: &str) -> Option<Record> {
    match RecordParser::default().parse(line) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(error = %e, "Discarding malformed record");
            None
        }
    }
}

fn first_unquoted_comma(line: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

fn strip_one_quote_layer(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
