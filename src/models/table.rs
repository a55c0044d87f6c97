// file: src/models/table.rs
// description: ordered collection of result rows for one run

use super::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable<R> {
    rows: Vec<R>,
}

impl<R: Record> ResultTable<R> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, row: R) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Record> Default for ResultTable<R> {
    fn default() -> Self {
        Self::new()
    }
}
