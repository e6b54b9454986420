//! src/sentiment.rs
use std::fmt;
use std::str::FromStr;

/// Binary label attached to every corpus record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid sentiment label '{0}', expected '1' or '-1'")]
pub struct SentimentParseError(pub String);

impl Sentiment {
    pub const ALL: [Sentiment; 2] = [Sentiment::Positive, Sentiment::Negative];

    /// The label as it appears in the corpus and in intermediate files.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "1",
            Sentiment::Negative => "-1",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl FromStr for Sentiment {
    type Err = SentimentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Sentiment::Positive),
            "-1" => Ok(Sentiment::Negative),
            other => Err(SentimentParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
