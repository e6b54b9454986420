//! src/top_k.rs
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A word and its count within one sentiment class.
///
/// Ordering is rank order: a higher count ranks above a lower one and, for
/// equal counts, the lexicographically smaller word ranks above. Sorting
/// descending therefore yields the final ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedWord {
    pub word: String,
    pub count: u64,
}

impl RankedWord {
    pub fn new(word: &str, count: u64) -> Self {
        RankedWord {
            word: word.to_string(),
            count,
        }
    }
}

impl Ord for RankedWord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.word.cmp(&self.word))
    }
}

impl PartialOrd for RankedWord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selects the `k` best-ranked entries, best first.
///
/// Keeps a min-heap of at most `k` entries, so the cost is `O(n log k)` time
/// and `O(k)` space. The heap minimum is replaced only by an entry that ranks
/// strictly above it, which makes the result identical to sorting everything
/// and taking the first `k`.
pub fn select_top_k<I>(entries: I, k: usize) -> Vec<RankedWord>
where
    I: IntoIterator<Item = RankedWord>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<RankedWord>> = BinaryHeap::new();
    for entry in entries {
        if heap.len() < k {
            heap.push(Reverse(entry));
        } else if let Some(mut weakest) = heap.peek_mut() {
            if entry > weakest.0 {
                // PeekMut restores the heap property on drop.
                *weakest = Reverse(entry);
            }
        }
    }

    let mut ranked: Vec<RankedWord> = heap.into_iter().map(|Reverse(entry)| entry).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked
}
