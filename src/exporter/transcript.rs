// file: src/exporter/transcript.rs
// description: json export of the conversation turns recorded during a run

use crate::error::{PipelineError, Result};
use crate::session::Turn;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub run_id: Uuid,
    pub recipe: String,
    pub model: String,
    pub exported_at: String,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Clone)]
pub struct TranscriptExporter {
    path: PathBuf,
}

impl TranscriptExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn export(&self, run_id: Uuid, recipe: &str, model: &str, turns: &[Turn]) -> Result<()> {
        let transcript = Transcript {
            run_id,
            recipe: recipe.to_string(),
            model: model.to_string(),
            exported_at: Utc::now().to_rfc3339(),
            turns: turns.to_vec(),
        };

        let contents = serde_json::to_string_pretty(&transcript)
            .map_err(|e| PipelineError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| PipelineError::output_write(&self.path, e))?;
        }

        fs::write(&self.path, contents).map_err(|e| PipelineError::output_write(&self.path, e))?;

        info!(
            "Saved transcript with {} turns to {}",
            transcript.turns.len(),
            self.path.display()
        );
        Ok(())
    }
}
