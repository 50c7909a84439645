//! Core domain types

pub mod embedding;
pub mod label;
pub mod record;

pub use embedding::Embedding;
pub use label::LabelSet;
pub use record::{EvalQuery, IndexRecord, QueryResult};
