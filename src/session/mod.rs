// file: src/session/mod.rs
// description: conversational session over a text-generation service
// reference: append-only chat history threaded through every stage call

pub mod gemini;

use crate::error::Result;
use crate::utils::Validator;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

pub use gemini::GeminiClient;

/// Sampling parameters sent with every turn. Fixed per recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    pub const fn email() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.50,
            top_k: 64,
            max_output_tokens: 512,
        }
    }

    pub const fn review() -> Self {
        Self {
            temperature: 0.5,
            top_p: 0.65,
            top_k: 64,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub prompt: String,
    pub response: String,
}

/// A stateless text-generation backend. The caller supplies the whole
/// conversation so far together with the new prompt.
pub trait GenerationService {
    fn generate(
        &self,
        config: &GenerationConfig,
        history: &[Turn],
        prompt: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// One continuous dialogue. Successful calls are appended in call order and
/// every later call sees all of them; nothing is ever removed.
pub struct ConversationSession<S> {
    service: S,
    config: GenerationConfig,
    turns: Vec<Turn>,
}

impl<S: GenerationService> ConversationSession<S> {
    /// No request is made until the first `send`.
    pub fn open(service: S, config: GenerationConfig) -> Self {
        Self {
            service,
            config,
            turns: Vec::new(),
        }
    }

    pub async fn send(&mut self, prompt: &str) -> Result<String> {
        debug!(
            "Sending turn {} ({} chars of prompt)",
            self.turns.len() + 1,
            prompt.len()
        );

        let response = self
            .service
            .generate(&self.config, &self.turns, prompt)
            .await?;

        debug!(
            "Turn {} response: {}",
            self.turns.len() + 1,
            Validator::truncate_text(&response, 80)
        );

        self.turns.push(Turn {
            prompt: prompt.to_string(),
            response: response.clone(),
        });

        Ok(response)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedService;
    use super::*;

    #[test]
    fn test_open_makes_no_calls() {
        let session = ConversationSession::open(ScriptedService::new(), GenerationConfig::email());
        assert_eq!(session.turn_count(), 0);
        assert!(session.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_turns_accumulate_in_call_order() {
        let mut session =
            ConversationSession::open(ScriptedService::new(), GenerationConfig::review());

        assert_eq!(session.send("first").await.unwrap(), "reply-1");
        assert_eq!(session.send("second").await.unwrap(), "reply-2");

        assert_eq!(session.turn_count(), 2);
        assert_eq!(session.turns()[0].prompt, "first");
        assert_eq!(session.turns()[1].response, "reply-2");

        let calls = session.service().calls();
        assert_eq!(calls[0], (0, "first".to_string()));
        assert_eq!(calls[1], (1, "second".to_string()));
    }

    #[tokio::test]
    async fn test_failed_send_appends_nothing() {
        let mut session =
            ConversationSession::open(ScriptedService::failing_on(&[1]), GenerationConfig::email());

        assert!(session.send("lost").await.is_err());
        assert_eq!(session.turn_count(), 0);

        assert_eq!(session.send("kept").await.unwrap(), "reply-2");
        assert_eq!(session.turn_count(), 1);
    }

    #[test]
    fn test_recipe_generation_configs() {
        let email = GenerationConfig::email();
        assert_eq!(email.max_output_tokens, 512);
        assert_eq!(email.top_k, 64);

        let review = GenerationConfig::review();
        assert_eq!(review.temperature, 0.5);
        assert_eq!(review.top_p, 0.65);
        assert_eq!(review.max_output_tokens, 8192);
    }
}
