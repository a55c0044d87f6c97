// file: src/stages/mod.rs
// description: enrichment stages, each one prompt and one session turn
// reference: prompt-and-call stages with per-stage fallback text

pub mod prompts;

use crate::error::Result;
use crate::session::{ConversationSession, GenerationService};
use std::fmt;
use tracing::warn;

pub use prompts::PromptTemplate;

pub const SUMMARIZATION_FAILED: &str = "Summarization failed";
pub const TRANSLATION_FAILED: &str = "Translation failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Summarize,
    Translate,
    GuessProduct,
    AnalyseSentiment,
    ComposeReply,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Summarize => "summarize",
            Stage::Translate => "translate",
            Stage::GuessProduct => "guess_product",
            Stage::AnalyseSentiment => "analyse_sentiment",
            Stage::ComposeReply => "compose_reply",
        }
    }

    pub fn template(&self) -> PromptTemplate {
        match self {
            Stage::Summarize => prompts::SUMMARIZE,
            Stage::Translate => prompts::TRANSLATE,
            Stage::GuessProduct => prompts::GUESS_PRODUCT,
            Stage::AnalyseSentiment => prompts::ANALYSE_SENTIMENT,
            Stage::ComposeReply => prompts::COMPOSE_REPLY,
        }
    }

    /// Text recorded in place of the response when the call fails.
    /// GuessProduct and AnalyseSentiment share the email stages' wording.
    /// ComposeReply has none and lets the error through.
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Stage::Summarize | Stage::GuessProduct => Some(SUMMARIZATION_FAILED),
            Stage::Translate | Stage::AnalyseSentiment => Some(TRANSLATION_FAILED),
            Stage::ComposeReply => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutput {
    Generated(String),
    Fallback {
        sentinel: &'static str,
        reason: String,
    },
}

impl StageOutput {
    pub fn text(&self) -> &str {
        match self {
            StageOutput::Generated(text) => text,
            StageOutput::Fallback { sentinel, .. } => sentinel,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            StageOutput::Generated(text) => text,
            StageOutput::Fallback { sentinel, .. } => sentinel.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StageOutput::Fallback { .. })
    }
}

async fn run_with_fallback<S: GenerationService>(
    session: &mut ConversationSession<S>,
    stage: Stage,
    sentinel: &'static str,
    prompt: String,
) -> StageOutput {
    match session.send(&prompt).await {
        Ok(text) => StageOutput::Generated(text),
        Err(e) => {
            warn!("Error during {}: {}", stage, e);
            StageOutput::Fallback {
                sentinel,
                reason: e.to_string(),
            }
        }
    }
}

pub async fn summarize<S: GenerationService>(
    session: &mut ConversationSession<S>,
    body: &str,
) -> StageOutput {
    let prompt = Stage::Summarize.template().render(&[("body", body)]);
    run_with_fallback(session, Stage::Summarize, SUMMARIZATION_FAILED, prompt).await
}

pub async fn translate<S: GenerationService>(
    session: &mut ConversationSession<S>,
    summary: &str,
    target_language: &str,
) -> StageOutput {
    let prompt = Stage::Translate
        .template()
        .render(&[("target_language", target_language), ("summary", summary)]);
    run_with_fallback(session, Stage::Translate, TRANSLATION_FAILED, prompt).await
}

pub async fn guess_product<S: GenerationService>(
    session: &mut ConversationSession<S>,
    review_body: &str,
) -> StageOutput {
    let prompt = Stage::GuessProduct
        .template()
        .render(&[("review_body", review_body)]);
    run_with_fallback(session, Stage::GuessProduct, SUMMARIZATION_FAILED, prompt).await
}

pub async fn analyse_sentiment<S: GenerationService>(
    session: &mut ConversationSession<S>,
    review: &str,
) -> StageOutput {
    let prompt = Stage::AnalyseSentiment
        .template()
        .render(&[("review", review)]);
    run_with_fallback(session, Stage::AnalyseSentiment, TRANSLATION_FAILED, prompt).await
}

/// Asks for the sentiment line and the thank-you reply in a single turn.
/// Failures are returned to the caller unchanged.
pub async fn compose_reply<S: GenerationService>(
    session: &mut ConversationSession<S>,
    review: &str,
    sentiment: &str,
) -> Result<String> {
    let prompt = Stage::ComposeReply
        .template()
        .render(&[("review", review), ("sentiment", sentiment)]);
    session.send(&prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::session::GenerationConfig;
    use crate::session::testing::ScriptedService;

    fn session(failing: &[usize]) -> ConversationSession<ScriptedService> {
        ConversationSession::open(ScriptedService::failing_on(failing), GenerationConfig::email())
    }

    #[tokio::test]
    async fn test_summarize_prompt_and_turn() {
        let mut session = session(&[]);
        let output = summarize(&mut session, "Body line 1 Body line 2").await;

        assert_eq!(output, StageOutput::Generated("reply-1".to_string()));
        assert_eq!(session.turn_count(), 1);
        assert_eq!(
            session.turns()[0].prompt,
            "Summarize the following email content:\nBody line 1 Body line 2"
        );
    }

    #[tokio::test]
    async fn test_summarize_failure_uses_sentinel() {
        let mut session = session(&[1]);
        let output = summarize(&mut session, "body").await;

        assert!(output.is_fallback());
        assert_eq!(output.text(), "Summarization failed");
        assert_eq!(session.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_translate_prompt_embeds_language() {
        let mut session = session(&[]);
        translate(&mut session, "A summary.", "Tamil").await;

        assert_eq!(
            session.turns()[0].prompt,
            "Translate this email summary to only Tamil:\nA summary."
        );
    }

    #[tokio::test]
    async fn test_review_stage_sentinels_are_reused() {
        let mut session = session(&[1, 2]);

        let product = guess_product(&mut session, "nice lamp").await;
        let sentiment = analyse_sentiment(&mut session, "Review: nice lamp").await;

        assert_eq!(product.into_text(), "Summarization failed");
        assert_eq!(sentiment.into_text(), "Translation failed");
    }

    #[tokio::test]
    async fn test_compose_reply_is_one_turn() {
        let mut session = session(&[]);
        let reply = compose_reply(&mut session, "great", "Positive").await.unwrap();

        assert_eq!(reply, "reply-1");
        assert_eq!(session.turn_count(), 1);
        let prompt = &session.turns()[0].prompt;
        assert!(prompt.contains("\"great\""));
        assert!(prompt.contains("sentiment:Positive"));
    }

    #[tokio::test]
    async fn test_compose_reply_failure_propagates() {
        let mut session = session(&[1]);
        let result = compose_reply(&mut session, "great", "Positive").await;
        assert!(matches!(result, Err(PipelineError::Generation(_))));
    }

    #[test]
    fn test_only_compose_reply_lacks_sentinel() {
        assert_eq!(Stage::ComposeReply.sentinel(), None);
        for stage in [
            Stage::Summarize,
            Stage::Translate,
            Stage::GuessProduct,
            Stage::AnalyseSentiment,
        ] {
            assert!(stage.sentinel().is_some(), "{} has no sentinel", stage);
        }
    }

    #[tokio::test]
    async fn test_fallbacks_carry_declared_sentinels() {
        let mut session = session(&[1, 2, 3, 4]);

        let outputs = [
            (Stage::Summarize, summarize(&mut session, "body").await),
            (Stage::Translate, translate(&mut session, "summary", "Tamil").await),
            (Stage::GuessProduct, guess_product(&mut session, "lamp").await),
            (Stage::AnalyseSentiment, analyse_sentiment(&mut session, "lamp").await),
        ];

        for (stage, output) in outputs {
            let StageOutput::Fallback { sentinel, reason } = output else {
                panic!("{} did not fall back", stage);
            };
            assert_eq!(Some(sentinel), stage.sentinel(), "{}", stage);
            assert!(reason.contains("scripted failure"), "{}", reason);
        }
        assert_eq!(session.turn_count(), 0);
    }
}
