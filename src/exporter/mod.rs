// file: src/exporter/mod.rs
// description: result and transcript output exports
// reference: internal module structure

pub mod csv_sink;
pub mod transcript;

pub use csv_sink::{CsvSink, ResultSink};
pub use transcript::{Transcript, TranscriptExporter};
