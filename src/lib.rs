// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod session;
pub mod stages;
pub mod utils;

pub use config::{Config, GeminiConfig, RecipeConfig};
pub use error::{PipelineError, Result};
pub use exporter::{CsvSink, ResultSink, Transcript, TranscriptExporter};
pub use models::{Document, EmailRecord, Record, ResultTable, ReviewRecord};
pub use parser::{
    EmailFields, ReviewFields, extract_email_fields, extract_review_fields, read_batch,
    split_batch,
};
pub use pipeline::{EmailRecipe, Pipeline, Recipe, ReviewRecipe, RunOutcome, RunStats};
pub use session::{ConversationSession, GeminiClient, GenerationConfig, GenerationService, Turn};
pub use stages::{Stage, StageOutput};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _sink = CsvSink::new();
        assert_eq!(EmailRecipe::new().target_language(), "Tamil");
    }
}
