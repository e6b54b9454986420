//! src/reducers/adder.rs
use crate::aggregator::{CountEntry, SentimentWord};
use crate::functions::{ReduceEmitter, Reducer};

/// Sums the (possibly pre-aggregated) counts of one key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adder;

impl Reducer for Adder {
    type Key = SentimentWord;
    type Value = u64;
    type Output = CountEntry;

    fn reduce<I, E>(&self, key: &SentimentWord, values: I, emitter: &mut E)
    where
        I: Iterator<Item = u64>,
        E: ReduceEmitter<CountEntry>,
    {
        let total = values.fold(0u64, u64::saturating_add);
        emitter.emit(CountEntry::new(key.clone(), total));
    }
}
