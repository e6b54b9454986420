//! src/stages/mod.rs
mod top_k;
mod word_count;

pub use top_k::{TopKReport, TopKStage};
pub use word_count::{WordCountReport, WordCountStage};
