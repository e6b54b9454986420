//! src/reducers/top_k.rs
use crate::functions::{ReduceEmitter, Reducer};
use crate::output::SentimentRanking;
use crate::sentiment::Sentiment;
use crate::top_k::{RankedWord, select_top_k};
use std::num::NonZeroUsize;

pub struct TopKReducer {
    k: NonZeroUsize,
}

impl TopKReducer {
    pub fn new(k: NonZeroUsize) -> Self {
        Self { k }
    }
}

impl Reducer for TopKReducer {
    type Key = Sentiment;
    type Value = RankedWord;
    type Output = SentimentRanking;

    fn reduce<I, E>(&self, key: &Sentiment, values: I, emitter: &mut E)
    where
        I: Iterator<Item = RankedWord>,
        E: ReduceEmitter<SentimentRanking>,
    {
        emitter.emit(SentimentRanking {
            sentiment: *key,
            words: select_top_k(values, self.k.get()),
        });
    }
}
