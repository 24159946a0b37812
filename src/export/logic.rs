// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::models::{EventRecord, RecordId};
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the filtered records.
    ///
    /// - `format`: "csv" | "json"
    /// - `file`: absolute path of the output file
    /// - `is_pinned`: answers from the pinned store
    pub fn export(
        records: &[&EventRecord],
        is_pinned: &dyn Fn(RecordId) -> bool,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        if records.is_empty() {
            warning("No records match the selected filters, nothing exported.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<RecordExport> = records
            .iter()
            .map(|r| RecordExport::from_record(r, is_pinned(r.id)))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
