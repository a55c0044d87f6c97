// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use chat_enrich::utils::logging::{format_error, format_success, format_warning};
use chat_enrich::{
    Config, CsvSink, Document, EmailRecipe, GeminiClient, Pipeline, Recipe, RecipeConfig,
    ResultSink, ReviewRecipe, RunOutcome, TranscriptExporter, Validator, read_batch,
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "chat_enrich")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Enrich batches of emails or reviews through one Gemini chat session", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Hide the progress bar
    #[arg(short, long, action = ArgAction::SetTrue)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize each email and translate the summary
    Emails {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Guess the product, classify sentiment and draft a reply for each review
    Reviews {
        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also save the conversation turns as JSON
    #[arg(long, value_name = "FILE")]
    transcript: Option<PathBuf>,
}

impl IoArgs {
    fn apply(&self, recipe: &RecipeConfig) -> RecipeConfig {
        let mut recipe = recipe.clone();
        if let Some(input) = &self.input {
            recipe.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            recipe.output_path = output.clone();
        }
        recipe
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    chat_enrich::utils::logging::init_logger(cli.color, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format_error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let api_key = config.api_key()?.to_string();

    let client = GeminiClient::new(
        api_key,
        config.gemini.model.clone(),
        config.gemini.base_url.clone(),
    );
    let show_progress = !cli.quiet;

    match cli.command {
        Commands::Emails { io } => {
            let recipe_config = io.apply(&config.email);
            let pipeline = Pipeline::open(EmailRecipe::new(), client)
                .with_progress(show_progress, cli.color);
            cmd_run(pipeline, &recipe_config, &config.gemini.model, io.transcript).await
        }
        Commands::Reviews { io } => {
            let recipe_config = io.apply(&config.review);
            let pipeline = Pipeline::open(ReviewRecipe::new(), client)
                .with_progress(show_progress, cli.color);
            cmd_run(pipeline, &recipe_config, &config.gemini.model, io.transcript).await
        }
    }
}

async fn cmd_run<R: Recipe>(
    mut pipeline: Pipeline<R, GeminiClient>,
    recipe_config: &RecipeConfig,
    model: &str,
    transcript: Option<PathBuf>,
) -> Result<()> {
    info!(
        "Loading {} from: {}",
        pipeline.recipe().name(),
        recipe_config.input_path.display()
    );

    if let Err(e) = Validator::validate_output_parent(&recipe_config.output_path) {
        warn!("{}", e);
    }

    let documents = Document::from_batch(read_batch(
        &recipe_config.input_path,
        &recipe_config.delimiter,
    ));

    let outcome = pipeline
        .run(&documents)
        .await
        .with_context(|| format!("Processing {} failed", pipeline.recipe().name()))?;

    if let Some(path) = transcript {
        TranscriptExporter::new(path)
            .export(
                pipeline.run_id(),
                pipeline.recipe().name(),
                model,
                pipeline.session().turns(),
            )
            .context("Failed to save transcript")?;
    }

    match outcome {
        RunOutcome::EmptyBatch => {
            println!(
                "{}",
                format_warning(&format!("No {} to process.", pipeline.recipe().name()))
            );
        }
        RunOutcome::Completed { table, stats } => {
            CsvSink::new()
                .write(&table, &recipe_config.output_path)
                .context("Failed to save results")?;

            info!(
                "{} documents, {} turns, {} fallbacks, {:.1}% stage success",
                stats.documents_processed,
                stats.session_turns,
                stats.stage_fallbacks,
                stats.stage_success_rate()
            );
            println!(
                "{}",
                format_success(&format!(
                    "Process completed successfully. Data saved to '{}'.",
                    recipe_config.output_path.display()
                ))
            );
        }
    }

    Ok(())
}
