//! Document rendering: one work record in, document bytes out.

pub mod invoice;
pub mod pdf;

pub use invoice::PdfInvoiceRenderer;

use crate::errors::AppResult;
use crate::models::record::WorkRecord;
use std::fs;
use std::path::{Path, PathBuf};

pub trait DocumentRenderer: Send + Sync {
    fn render(&self, rec: &WorkRecord) -> AppResult<Vec<u8>>;

    /// File name used when the document is written to disk or attached.
    fn file_name(&self, rec: &WorkRecord) -> String;
}

/// Render `rec` into `dir` (created if missing) and return the written path.
pub fn write_document(
    renderer: &dyn DocumentRenderer,
    rec: &WorkRecord,
    dir: &Path,
) -> AppResult<PathBuf> {
    let bytes = renderer.render(rec)?;
    save_bytes(dir, &renderer.file_name(rec), &bytes)
}

/// Write already rendered bytes as `dir/file_name`.
pub fn save_bytes(dir: &Path, file_name: &str, bytes: &[u8]) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;

    tracing::debug!(path = %path.display(), size = bytes.len(), "document written");
    Ok(path)
}
