//! src/mappers/word_counter.rs
use crate::aggregator::SentimentWord;
use crate::functions::{MapEmitter, Mapper};
use crate::normalizer::TextNormalizer;
use crate::record::{RecordError, RecordParser};

/// Emits `((sentiment, word), 1)` for every token of a corpus record.
#[derive(Debug, Clone)]
pub struct SentimentWordCounter {
    parser: RecordParser,
    normalizer: TextNormalizer,
}

impl SentimentWordCounter {
    pub fn new(parser: RecordParser, normalizer: TextNormalizer) -> Self {
        Self { parser, normalizer }
    }
}

impl Mapper for SentimentWordCounter {
    type Key = SentimentWord;
    type Value = u64;
    type Error = RecordError;

    fn map<E>(&self, _line_number: u64, line: &str, emitter: &mut E) -> Result<(), RecordError>
    where
        E: MapEmitter<SentimentWord, u64>,
    {
        let Some(record) = self.parser.parse(line)? else {
            return Ok(());
        };
        for word in self.normalizer.normalize(record.text()) {
            emitter.emit(
                SentimentWord {
                    sentiment: record.sentiment(),
                    word,
                },
                1,
            );
        }
        Ok(())
    }
}
