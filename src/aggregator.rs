//! src/aggregator.rs
//!
//! Counting by `(sentiment, word)`.
//!
//! Counts are merged by integer addition, so any partitioning of the
//! occurrences into partial tables produces the same totals once every
//! partial has been folded in. Workers pre-aggregate into a [`CountTable`];
//! the master routes all partials through a [`Shuffle`] and only after every
//! worker has finished hands each key to the reducer.
use crate::functions::MapEmitter;
use crate::sentiment::Sentiment;
use std::collections::{BTreeMap, HashMap};

/// Composite grouping key for the word count stage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SentimentWord {
    pub sentiment: Sentiment,
    pub word: String,
}

impl SentimentWord {
    pub fn new(sentiment: Sentiment, word: &str) -> Self {
        SentimentWord {
            sentiment,
            word: word.to_string(),
        }
    }
}

/// Total occurrences of one word within one sentiment class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountEntry {
    pub sentiment: Sentiment,
    pub word: String,
    pub count: u64,
}

impl CountEntry {
    pub fn new(key: SentimentWord, count: u64) -> Self {
        CountEntry {
            sentiment: key.sentiment,
            word: key.word,
            count,
        }
    }
}

/// Partial sums keyed by [`SentimentWord`]. Used as the combiner on workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: HashMap<SentimentWord, u64>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: SentimentWord, count: u64) {
        *self.counts.entry(key).or_insert(0) += count;
    }

    /// Folds another partial table into this one.
    pub fn merge(&mut self, other: CountTable) {
        for (key, count) in other.counts {
            self.add(key, count);
        }
    }

    pub fn get(&self, key: &SentimentWord) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl MapEmitter<SentimentWord, u64> for CountTable {
    fn emit(&mut self, key: SentimentWord, value: u64) {
        self.add(key, value);
    }
}

impl IntoIterator for CountTable {
    type Item = (SentimentWord, u64);
    type IntoIter = std::collections::hash_map::IntoIter<SentimentWord, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Groups values by key, in key order.
#[derive(Debug, Clone)]
pub struct Shuffle<K, V> {
    groups: BTreeMap<K, Vec<V>>,
}

impl<K: Ord, V> Default for Shuffle<K, V> {
    fn default() -> Self {
        Shuffle {
            groups: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> Shuffle<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            self.emit(key, value);
        }
    }

    pub fn merge(&mut self, other: Shuffle<K, V>) {
        for (key, mut values) in other.groups {
            self.groups.entry(key).or_default().append(&mut values);
        }
    }

    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    pub fn into_groups(self) -> impl Iterator<Item = (K, Vec<V>)> {
        self.groups.into_iter()
    }
}

impl<K: Ord, V> MapEmitter<K, V> for Shuffle<K, V> {
    fn emit(&mut self, key: K, value: V) {
        self.groups.entry(key).or_default().push(value);
    }
}
