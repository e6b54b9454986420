//! src/mappers/mod.rs
mod top_k;
mod word_counter;

pub use top_k::TopKMapper;
pub use word_counter::SentimentWordCounter;
