//! One-file-per-entity export.
//!
//! Each record is written to `<output_dir>/<id>.json`. Batches stop at the
//! first failure; files already written stay on disk and are replaced on the
//! next regeneration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::error::{RecordError, RecordResult};
use crate::record::Record;
use crate::serialize::to_file_with;

/// Path of the exported file for `record` inside `dir`
pub fn output_path(record: &Record, dir: &Path) -> RecordResult<PathBuf> {
    let id = record.id().ok_or_else(|| RecordError::MissingKey {
        record: record.schema().name,
        field: record.schema().id_field.unwrap_or("id").to_string(),
    })?;
    Ok(dir.join(format!("{}.json", id)))
}

/// Create the configured output directory if needed
pub fn ensure_output_dir(config: &ExportConfig) -> RecordResult<()> {
    fs::create_dir_all(&config.output_dir)?;
    Ok(())
}

/// Write one record into the configured output directory
pub fn export_record(record: &Record, config: &ExportConfig) -> RecordResult<PathBuf> {
    let path = output_path(record, &config.output_dir)?;
    to_file_with(record, &path, config.render_options())?;
    Ok(path)
}

/// Write every record, creating the output directory first
pub fn export_all<'a, I>(records: I, config: &ExportConfig) -> RecordResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = &'a Record>,
{
    ensure_output_dir(config)?;

    let paths = records
        .into_iter()
        .map(|record| export_record(record, config))
        .collect::<RecordResult<Vec<_>>>()?;

    tracing::info!(
        count = paths.len(),
        dir = %config.output_dir.display(),
        "exported records"
    );
    Ok(paths)
}
