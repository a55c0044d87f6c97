// file: src/session/gemini.rs
// description: Gemini generateContent integration used as the chat backend
// reference: https://ai.google.dev/api/generate-content

use super::{GenerationConfig, GenerationService, Turn};
use crate::error::{PipelineError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl GenerationService for GeminiClient {
    async fn generate(
        &self,
        config: &GenerationConfig,
        history: &[Turn],
        prompt: &str,
    ) -> Result<String> {
        let request = build_request(config, history, prompt);

        debug!(
            "Requesting {} with {} prior turns",
            self.model,
            history.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::Generation(format!("Failed to send Gemini API request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Generation(format!(
                "Gemini API request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            PipelineError::Generation(format!("Failed to parse Gemini API response: {}", e))
        })?;

        extract_text(body)
    }
}

fn build_request<'a>(
    config: &'a GenerationConfig,
    history: &'a [Turn],
    prompt: &'a str,
) -> GenerateContentRequest<'a> {
    let mut contents = Vec::with_capacity(history.len() * 2 + 1);

    for turn in history {
        contents.push(Content {
            role: "user",
            parts: [TextPart { text: &turn.prompt }],
        });
        contents.push(Content {
            role: "model",
            parts: [TextPart {
                text: &turn.response,
            }],
        });
    }

    contents.push(Content {
        role: "user",
        parts: [TextPart { text: prompt }],
    });

    GenerateContentRequest {
        contents,
        generation_config: config,
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(PipelineError::Generation(format!(
            "Prompt blocked by Gemini: {}",
            reason
        )));
    }

    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        PipelineError::Generation("No candidates returned from Gemini API".to_string())
    })?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(PipelineError::Generation(format!(
            "Gemini returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}
