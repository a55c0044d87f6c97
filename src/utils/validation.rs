// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    /// Checks that the directory an output file would be created in exists.
    pub fn validate_output_parent(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(PipelineError::Validation(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )))
            }
            _ => Ok(()),
        }
    }

    pub fn validate_delimiter(delimiter: &str) -> Result<()> {
        if delimiter.trim().is_empty() {
            return Err(PipelineError::Validation(
                "Delimiter must contain visible characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Shortens `text` to at most `max_chars` characters for log output.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
            None => text.to_string(),
        }
    }
}
