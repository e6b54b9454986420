//! src/reducers/mod.rs
mod adder;
mod top_k;

pub use adder::Adder;
pub use top_k::TopKReducer;
