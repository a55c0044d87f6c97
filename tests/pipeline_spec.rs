use chat_enrich::{
    CsvSink, Document, EmailRecipe, GenerationConfig, GenerationService, Pipeline, PipelineError,
    ResultSink, ReviewRecipe, RunOutcome, Turn, read_batch,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

/// Answers every prompt with a label derived from its first word, failing
/// prompts that start with `fail_prefix`.
struct FakeGemini {
    fail_prefix: Option<&'static str>,
    seen: Mutex<Vec<(GenerationConfig, usize, String)>>,
}

impl FakeGemini {
    fn new() -> Self {
        Self {
            fail_prefix: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(prefix: &'static str) -> Self {
        Self {
            fail_prefix: Some(prefix),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<(GenerationConfig, usize, String)> {
        self.seen.lock().unwrap().clone()
    }
}

impl GenerationService for FakeGemini {
    async fn generate(
        &self,
        config: &GenerationConfig,
        history: &[Turn],
        prompt: &str,
    ) -> chat_enrich::Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push((*config, history.len(), prompt.to_string()));

        if self.fail_prefix.is_some_and(|prefix| prompt.starts_with(prefix)) {
            return Err(PipelineError::Generation("service unavailable".to_string()));
        }

        let word = prompt.split_whitespace().next().unwrap_or_default();
        Ok(format!("{} #{}", word, history.len() + 1))
    }
}

const EMAILS: &str = "From: a@x.com\nTo: b@x.com\nSubject: S\nBody line 1\nBody line 2\n\
---END OF EMAIL---\n\
From: c@x.com\nTo: d@x.com\nSecond body\n---END OF EMAIL---\n\n";

const REVIEWS: &str = "Original Name: Widget\nReview: works great\n---END OF REVIEW---\n\
Original Name: Lamp\nReview: too dim\n---END OF REVIEW---\n";

fn write_batch(dir: &TempDir, name: &str, contents: &str) -> Vec<Document> {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    let delimiter = if name.starts_with("email") {
        "---END OF EMAIL---"
    } else {
        "---END OF REVIEW---"
    };
    Document::from_batch(read_batch(&path, delimiter))
}

#[tokio::test]
async fn email_batch_to_csv() {
    let dir = TempDir::new().unwrap();
    let documents = write_batch(&dir, "emails.txt", EMAILS);
    assert_eq!(documents.len(), 2);

    let mut pipeline = Pipeline::open(EmailRecipe::new(), FakeGemini::new());
    let RunOutcome::Completed { table, stats } = pipeline.run(&documents).await.unwrap() else {
        panic!("expected rows");
    };

    assert_eq!(stats.session_turns, 4);
    assert_eq!(stats.stage_fallbacks, 0);

    let seen = pipeline.session().service().seen();
    assert!(seen.iter().all(|(config, _, _)| *config == GenerationConfig::email()));
    assert_eq!(
        seen.iter().map(|(_, history, _)| *history).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
    assert_eq!(
        seen[0].2,
        "Summarize the following email content:\nBody line 1 Body line 2"
    );

    let output = dir.path().join("out.csv");
    CsvSink::new().write(&table, &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "FROM,TO,SUMMARY,SUMMARY(Translated)\n\
         a@x.com,b@x.com,Summarize #1,Translate #2\n\
         c@x.com,d@x.com,Summarize #3,Translate #4\n"
    );
}

#[tokio::test]
async fn summarize_outage_keeps_every_row() {
    let dir = TempDir::new().unwrap();
    let documents = write_batch(&dir, "emails.txt", EMAILS);

    let mut pipeline = Pipeline::open(EmailRecipe::new(), FakeGemini::failing("Summarize"));
    let RunOutcome::Completed { table, stats } = pipeline.run(&documents).await.unwrap() else {
        panic!("expected rows");
    };

    assert_eq!(table.len(), documents.len());
    assert_eq!(stats.stage_fallbacks, 2);
    for row in table.rows() {
        assert_eq!(row.summary, "Summarization failed");
        assert!(row.translated_summary.starts_with("Translate"));
    }
}

#[tokio::test]
async fn review_batch_shares_one_session() {
    let dir = TempDir::new().unwrap();
    let documents = write_batch(&dir, "reviews.txt", REVIEWS);

    let mut pipeline = Pipeline::open(ReviewRecipe::new(), FakeGemini::new());
    let RunOutcome::Completed { table, stats } = pipeline.run(&documents).await.unwrap() else {
        panic!("expected rows");
    };

    assert_eq!(stats.session_turns, 6);
    let rows = table.rows();
    assert_eq!(rows[0].original_product, "Widget");
    assert_eq!(rows[0].review, "works great");
    assert_eq!(rows[1].guessed_product, "Give #4");
    assert_eq!(rows[1].sentiment, "Try #5");
    assert_eq!(rows[1].reply, "Give #6");

    let seen = pipeline.session().service().seen();
    assert!(seen.iter().all(|(config, _, _)| *config == GenerationConfig::review()));
    assert!(seen[5].2.contains("sentiment:Try #5"));
}

#[tokio::test]
async fn reply_outage_ends_review_run() {
    let dir = TempDir::new().unwrap();
    let documents = write_batch(&dir, "reviews.txt", REVIEWS);

    let mut pipeline = Pipeline::open(ReviewRecipe::new(), FakeGemini::failing("Give 1 line"));
    let result = pipeline.run(&documents).await;

    assert!(matches!(result, Err(PipelineError::Generation(_))));
    assert_eq!(pipeline.session().turn_count(), 2);
}

#[tokio::test]
async fn missing_input_is_an_empty_batch() {
    let dir = TempDir::new().unwrap();
    let documents = Document::from_batch(read_batch(
        &dir.path().join("absent.txt"),
        "---END OF EMAIL---",
    ));

    let mut pipeline = Pipeline::open(EmailRecipe::new(), FakeGemini::new());
    let outcome = pipeline.run(&documents).await.unwrap();

    assert!(matches!(outcome, RunOutcome::EmptyBatch));
    assert!(pipeline.session().service().seen().is_empty());
}
