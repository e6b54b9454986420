//! src/lib.rs
pub mod aggregator;
pub mod configuration;
pub mod error;
pub mod file_splitter;
pub mod functions;
pub mod intermediate;
pub mod job;
pub mod mappers;
pub mod master;
pub mod normalizer;
pub mod output;
pub mod record;
pub mod reducers;
pub mod sentiment;
pub mod stages;
pub mod stopwords;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
pub mod top_k;
pub mod worker;
