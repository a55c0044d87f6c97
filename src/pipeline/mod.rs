// file: src/pipeline/mod.rs
// description: runs a recipe over a batch with one session for the whole run
// reference: pipeline orchestration

mod progress;
mod recipe;

pub use progress::{ProgressTracker, RunStats};
pub use recipe::{EmailRecipe, Enriched, Recipe, ReviewRecipe, TARGET_LANGUAGE};

use crate::error::Result;
use crate::models::{Document, ResultTable};
use crate::session::{ConversationSession, GenerationService};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

#[derive(Debug)]
pub enum RunOutcome<R> {
    /// The batch had no documents; no service calls were made.
    EmptyBatch,
    Completed {
        table: ResultTable<R>,
        stats: RunStats,
    },
}

/// Owns the run's session. Documents are processed strictly one after
/// another and the session is never reopened, so every prompt sees all the
/// turns of the documents before it.
pub struct Pipeline<R, S> {
    recipe: R,
    session: ConversationSession<S>,
    run_id: Uuid,
    show_progress: bool,
    colored: bool,
}

impl<R: Recipe, S: GenerationService> Pipeline<R, S> {
    pub fn open(recipe: R, service: S) -> Self {
        let session = ConversationSession::open(service, recipe.generation_config());
        Self {
            recipe,
            session,
            run_id: Uuid::new_v4(),
            show_progress: false,
            colored: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool, colored: bool) -> Self {
        self.show_progress = show_progress;
        self.colored = colored;
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn recipe(&self) -> &R {
        &self.recipe
    }

    pub fn session(&self) -> &ConversationSession<S> {
        &self.session
    }

    pub async fn run(&mut self, documents: &[Document]) -> Result<RunOutcome<R::Record>> {
        let span = info_span!("run", run_id = %self.run_id, recipe = self.recipe.name());
        self.run_documents(documents).instrument(span).await
    }

    async fn run_documents(&mut self, documents: &[Document]) -> Result<RunOutcome<R::Record>> {
        if documents.is_empty() {
            info!("No {} to process", self.recipe.name());
            return Ok(RunOutcome::EmptyBatch);
        }

        info!("Processing {} {}", documents.len(), self.recipe.name());

        let mut tracker = if self.show_progress {
            ProgressTracker::with_color(documents.len(), self.colored)
        } else {
            ProgressTracker::hidden(documents.len())
        };
        let mut table = ResultTable::with_capacity(documents.len());

        for document in documents {
            tracker.set_message(format!("Document {}/{}", document.index + 1, documents.len()));

            let enriched = self.recipe.process(&mut self.session, document).await?;

            info!(
                "Processed document {} ({} stage fallbacks)",
                document.index + 1,
                enriched.fallbacks.len()
            );
            tracker.record_document(enriched.fallbacks.len());
            table.push(enriched.record);
        }

        tracker.finish();
        let stats = tracker.stats(self.session.turn_count());

        info!(
            "Enriched {} documents with {} turns in {:.2}s ({:.2} documents/s)",
            stats.documents_processed,
            stats.session_turns,
            stats.duration_secs,
            stats.documents_per_second()
        );

        Ok(RunOutcome::Completed { table, stats })
    }
}
