// file: src/parser/review.rs
// description: product name and review text extraction from a two-line review header
// reference: line-position heuristics

use crate::error::{PipelineError, Result};

const FIELD_SEPARATOR: &str = ": ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFields {
    pub original_product: String,
    pub review_body: String,
}

/// Line 0 carries the product name and line 1 the review text, each after
/// the first `": "`.
pub fn extract_review_fields(document: &str) -> Result<ReviewFields> {
    let mut lines = document.lines();

    let original_product = field_value(lines.next(), "product name")?;
    let review_body = field_value(lines.next(), "review text")?;

    Ok(ReviewFields {
        original_product,
        review_body,
    })
}

fn field_value(line: Option<&str>, field: &str) -> Result<String> {
    let line = line.ok_or_else(|| PipelineError::Parse(format!("missing {} line", field)))?;

    line.split_once(FIELD_SEPARATOR)
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| {
            PipelineError::Parse(format!(
                "no '{}' separator in {} line: {}",
                FIELD_SEPARATOR, field, line
            ))
        })
}
