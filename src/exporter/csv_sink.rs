// file: src/exporter/csv_sink.rs
// description: writes result tables as comma-separated files
// reference: https://docs.rs/csv

use crate::error::{PipelineError, Result};
use crate::models::{Record, ResultTable};
use csv::WriterBuilder;
use std::path::Path;
use tracing::info;

pub trait ResultSink {
    fn write<R: Record>(&self, table: &ResultTable<R>, destination: &Path) -> Result<()>;
}

/// Header row is the record's column list, followed by one line per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl CsvSink {
    pub fn new() -> Self {
        Self
    }
}

impl ResultSink for CsvSink {
    fn write<R: Record>(&self, table: &ResultTable<R>, destination: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(destination)
            .map_err(|e| PipelineError::output_write(destination, e))?;

        writer
            .write_record(table.columns())
            .map_err(|e| PipelineError::output_write(destination, e))?;

        for row in table.rows() {
            writer
                .serialize(row)
                .map_err(|e| PipelineError::output_write(destination, e))?;
        }

        writer
            .flush()
            .map_err(|e| PipelineError::output_write(destination, e))?;

        info!(
            "Wrote {} rows to {}",
            table.len(),
            destination.display()
        );
        Ok(())
    }
}
