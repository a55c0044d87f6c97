// file: src/parser/batch.rs
// description: splits a raw batch file into trimmed documents on a sentinel delimiter
// reference: https://doc.rust-lang.org/std/primitive.str.html#method.split

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Splits `raw` on the literal `delimiter`, trimming every piece and dropping
/// the ones that end up empty. Order is preserved.
pub fn split_batch(raw: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        let trimmed = raw.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    raw.split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn try_read_batch(path: &Path, delimiter: &str) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).map_err(|source| PipelineError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    let documents = split_batch(&raw, delimiter);
    debug!(
        "Split {} bytes from {} into {} documents",
        raw.len(),
        path.display(),
        documents.len()
    );
    Ok(documents)
}

/// Reads and splits a batch file. An unreadable file is reported and treated
/// as an empty batch.
pub fn read_batch(path: &Path, delimiter: &str) -> Vec<String> {
    match try_read_batch(path, delimiter) {
        Ok(documents) => documents,
        Err(e) => {
            error!("Error reading the file: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EMAIL_DELIMITER;
    use tempfile::TempDir;

    #[test]
    fn test_split_preserves_order_and_trims() {
        let raw = "  first\n---END OF EMAIL---\n\nsecond  \n---END OF EMAIL---\n";
        assert_eq!(split_batch(raw, EMAIL_DELIMITER), vec!["first", "second"]);
    }

    #[test]
    fn test_split_drops_blank_pieces() {
        let raw = "---END OF EMAIL---\n   \n---END OF EMAIL------END OF EMAIL---only";
        assert_eq!(split_batch(raw, EMAIL_DELIMITER), vec!["only"]);
    }

    #[test]
    fn test_absent_delimiter_yields_whole_text() {
        assert_eq!(split_batch("\n hello world \n", "@@@"), vec!["hello world"]);
        assert!(split_batch(" \n\t ", "@@@").is_empty());
        assert!(split_batch("", "@@@").is_empty());
    }

    #[test]
    fn test_split_is_exact_and_case_sensitive() {
        let raw = "a\n---end of email---\nb";
        assert_eq!(split_batch(raw, EMAIL_DELIMITER).len(), 1);
    }

    #[test]
    fn test_read_batch_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("emails.txt");
        fs::write(&path, "one\n---END OF EMAIL---\ntwo\n---END OF EMAIL---\n").unwrap();

        assert_eq!(read_batch(&path, EMAIL_DELIMITER), vec!["one", "two"]);
    }

    #[test]
    fn test_unreadable_file_is_empty_batch() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.txt");

        assert!(read_batch(&missing, EMAIL_DELIMITER).is_empty());
        assert!(matches!(
            try_read_batch(&missing, EMAIL_DELIMITER),
            Err(PipelineError::InputRead { .. })
        ));
    }
}
