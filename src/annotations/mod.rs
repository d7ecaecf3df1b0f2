//! Annotation table loading.
//!
//! Reads Raven selection tables into annotation lists, validating that
//! every row carries a non-empty label in the configured label column.

mod parser;
mod types;

pub use parser::load_annotation_table;
pub use types::Annotation;
