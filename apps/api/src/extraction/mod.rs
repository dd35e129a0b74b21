//! Text extraction for uploaded documents, dispatched on file extension.
//!
//! PDF and DOCX are the upload formats; anything else is read as UTF-8 text.
//! An empty string is a valid result here. The orchestrator decides that it means failure.

mod docx;
mod pdf;

use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Document formats the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Case-insensitive match on the path's extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => DocumentFormat::Pdf,
            Some("docx") => DocumentFormat::Docx,
            _ => DocumentFormat::PlainText,
        }
    }
}

/// Reads the file at `path` and returns its textual content.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    info!("Extracting text from: {}", path.display());
    let format = DocumentFormat::from_path(path);
    let text = match format {
        DocumentFormat::Pdf => pdf::extract(&std::fs::read(path)?)?,
        DocumentFormat::Docx => docx::extract(&std::fs::read(path)?)?,
        DocumentFormat::PlainText => std::fs::read_to_string(path)?,
    };
    info!("Extracted {} characters from {:?} file", text.len(), format);
    Ok(text)
}
