// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use config::ConfigBuilder;
use config::builder::DefaultState;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const EMAIL_DELIMITER: &str = "---END OF EMAIL---";
pub const REVIEW_DELIMITER: &str = "---END OF REVIEW---";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub email: RecipeConfig,
    pub review: RecipeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Input and output locations for one recipe.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecipeConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub delimiter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

impl RecipeConfig {
    pub fn email() -> Self {
        Self {
            input_path: PathBuf::from("emails.txt"),
            output_path: PathBuf::from("Processed_email_summaries_with_context.csv"),
            delimiter: EMAIL_DELIMITER.to_string(),
        }
    }

    pub fn review() -> Self {
        Self {
            input_path: PathBuf::from("reviews.txt"),
            output_path: PathBuf::from("Processed_Review.csv"),
            delimiter: REVIEW_DELIMITER.to_string(),
        }
    }
}

/// Seeds every key of a recipe section so a partial TOML section or a
/// single environment override still deserializes.
fn with_recipe_defaults(
    builder: ConfigBuilder<DefaultState>,
    section: &str,
    recipe: &RecipeConfig,
) -> Result<ConfigBuilder<DefaultState>> {
    let defaults = [
        ("input_path", recipe.input_path.to_string_lossy().into_owned()),
        ("output_path", recipe.output_path.to_string_lossy().into_owned()),
        ("delimiter", recipe.delimiter.clone()),
    ];

    defaults
        .into_iter()
        .try_fold(builder, |builder, (key, value)| {
            builder.set_default(format!("{}.{}", section, key), value)
        })
        .map_err(|e| PipelineError::Config(e.to_string()))
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();
        builder = with_recipe_defaults(builder, "email", &RecipeConfig::email())?;
        builder = with_recipe_defaults(builder, "review", &RecipeConfig::review())?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new("config/default.toml")).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CHAT_ENRICH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.gemini.api_key = Some(key);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            email: RecipeConfig::email(),
            review: RecipeConfig::review(),
        }
    }

    /// Returns the Gemini credential, failing when it is absent or blank.
    pub fn api_key(&self) -> Result<&str> {
        match self.gemini.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(PipelineError::Config(format!(
                "API key not found. Set {} in the environment or a .env file",
                API_KEY_ENV
            ))),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.gemini.model.trim().is_empty() {
            return Err(PipelineError::Config(
                "gemini.model must not be empty".to_string(),
            ));
        }

        for (name, recipe) in [("email", &self.email), ("review", &self.review)] {
            Validator::validate_delimiter(&recipe.delimiter)
                .map_err(|e| PipelineError::Config(format!("{}.delimiter: {}", name, e)))?;
        }

        Ok(())
    }
}
