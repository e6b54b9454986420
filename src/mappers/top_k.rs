//! src/mappers/top_k.rs
use crate::functions::{MapEmitter, Mapper};
use crate::intermediate::{IntermediateError, decode};
use crate::sentiment::Sentiment;
use crate::top_k::RankedWord;

/// Re-keys intermediate count lines by sentiment so each class can be
/// ranked on its own.
#[derive(Debug, Clone, Default)]
pub struct TopKMapper;

impl Mapper for TopKMapper {
    type Key = Sentiment;
    type Value = RankedWord;
    type Error = IntermediateError;

    fn map<E>(
        &self,
        _line_number: u64,
        line: &str,
        emitter: &mut E,
    ) -> Result<(), IntermediateError>
    where
        E: MapEmitter<Sentiment, RankedWord>,
    {
        if line.trim().is_empty() {
            return Ok(());
        }
        let entry = decode(line)?;
        emitter.emit(
            entry.sentiment,
            RankedWord {
                word: entry.word,
                count: entry.count,
            },
        );
        Ok(())
    }
}
