// file: src/pipeline/recipe.rs
// description: the fixed stage sequences for email and review batches
// reference: per-document stage ordering over a shared session

use crate::error::Result;
use crate::models::{self, Document, EmailRecord, ReviewRecord};
use crate::parser::{ReviewFields, extract_email_fields, extract_review_fields};
use crate::session::{ConversationSession, GenerationConfig, GenerationService};
use crate::stages::{self, Stage, StageOutput};
use std::future::Future;
use tracing::{debug, warn};

pub const TARGET_LANGUAGE: &str = "Tamil";

/// Output of one document's pass through a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enriched<R> {
    pub record: R,
    pub fallbacks: Vec<Stage>,
}

pub trait Recipe {
    type Record: models::Record;

    fn name(&self) -> &'static str;

    fn generation_config(&self) -> GenerationConfig;

    /// Runs every stage for `document` against the shared session, in order.
    fn process<S: GenerationService>(
        &self,
        session: &mut ConversationSession<S>,
        document: &Document,
    ) -> impl Future<Output = Result<Enriched<Self::Record>>>;
}

fn note(fallbacks: &mut Vec<Stage>, stage: Stage, output: &StageOutput) {
    if output.is_fallback() {
        fallbacks.push(stage);
    }
}

/// Summarize the body, then translate the summary.
#[derive(Debug, Clone)]
pub struct EmailRecipe {
    target_language: String,
}

impl EmailRecipe {
    pub fn new() -> Self {
        Self {
            target_language: TARGET_LANGUAGE.to_string(),
        }
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }
}

impl Default for EmailRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for EmailRecipe {
    type Record = EmailRecord;

    fn name(&self) -> &'static str {
        "emails"
    }

    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig::email()
    }

    async fn process<S: GenerationService>(
        &self,
        session: &mut ConversationSession<S>,
        document: &Document,
    ) -> Result<Enriched<EmailRecord>> {
        let fields = extract_email_fields(&document.text);
        let mut fallbacks = Vec::new();

        let summary = stages::summarize(session, &fields.body).await;
        note(&mut fallbacks, Stage::Summarize, &summary);

        let translated = stages::translate(session, summary.text(), &self.target_language).await;
        note(&mut fallbacks, Stage::Translate, &translated);

        Ok(Enriched {
            record: EmailRecord {
                from: fields.sender,
                to: fields.receiver,
                summary: summary.into_text(),
                translated_summary: translated.into_text(),
            },
            fallbacks,
        })
    }
}

/// Guess the product, classify the sentiment, then compose a reply that
/// uses the classified sentiment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewRecipe;

impl ReviewRecipe {
    pub fn new() -> Self {
        Self
    }
}

impl Recipe for ReviewRecipe {
    type Record = ReviewRecord;

    fn name(&self) -> &'static str {
        "reviews"
    }

    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig::review()
    }

    async fn process<S: GenerationService>(
        &self,
        session: &mut ConversationSession<S>,
        document: &Document,
    ) -> Result<Enriched<ReviewRecord>> {
        let fields = extract_review_fields(&document.text).unwrap_or_else(|e| {
            warn!("Review {} has malformed header: {}", document.index + 1, e);
            ReviewFields::default()
        });
        debug!(
            "Review {} names product '{}'",
            document.index + 1,
            fields.original_product
        );
        let mut fallbacks = Vec::new();

        let guessed = stages::guess_product(session, &fields.review_body).await;
        note(&mut fallbacks, Stage::GuessProduct, &guessed);

        let sentiment = stages::analyse_sentiment(session, &document.text).await;
        note(&mut fallbacks, Stage::AnalyseSentiment, &sentiment);

        let reply = stages::compose_reply(session, &document.text, sentiment.text()).await?;

        Ok(Enriched {
            record: ReviewRecord {
                original_product: fields.original_product,
                guessed_product: guessed.into_text(),
                sentiment: sentiment.into_text(),
                review: fields.review_body,
                reply,
            },
            fallbacks,
        })
    }
}
