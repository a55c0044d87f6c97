// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod record;
pub mod table;

pub use document::Document;
pub use record::{EmailRecord, Record, ReviewRecord};
pub use table::ResultTable;
