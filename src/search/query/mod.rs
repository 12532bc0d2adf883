//! Query parsing and execution

pub mod execution;
pub mod parsing;

pub use execution::{build_index_query, retrieve, search};
pub use parsing::SearchQuery;
