// file: src/models/document.rs
// description: one delimited unit of batch input
// reference: internal data structures

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Zero-based position in the batch.
    pub index: usize,
    pub text: String,
}

impl Document {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Wraps split batch pieces, numbering them in order.
    pub fn from_batch(pieces: Vec<String>) -> Vec<Self> {
        pieces
            .into_iter()
            .enumerate()
            .map(|(index, text)| Self::new(index, text))
            .collect()
    }
}
