//! Text extraction for uploaded resume documents.
//!
//! Parsing is CPU-bound and the parsers may panic on malformed input, so all
//! work happens on the blocking pool and panics surface as errors.

use std::io::Cursor;

use bytes::Bytes;
use docx_rust::DocxFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read Word document: {0}")]
    Docx(String),

    #[error("document is not valid UTF-8 text")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("document parser crashed: {0}")]
    Panicked(String),
}

/// Supported upload formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    /// Legacy Word files are accepted but only readable when they hold plain text.
    Doc,
    Docx,
}

impl DocumentKind {
    /// Resolves the kind from the extension after the last `.`, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentKind::Text),
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// Extracts plain text from an uploaded document on the blocking pool.
pub async fn extract_text(kind: DocumentKind, bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text_blocking(kind, &bytes))
        .await
        .map_err(|e| ExtractionError::Panicked(e.to_string()))?
}

fn extract_text_blocking(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(format!("{e:?}")))?,
        DocumentKind::Docx => extract_docx(bytes)?,
        DocumentKind::Text | DocumentKind::Doc => String::from_utf8(bytes.to_vec())?,
    };
    debug!("Extracted {} chars from {:?} upload", text.len(), kind);
    Ok(text.replace("\r\n", "\n"))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let file = DocxFile::from_reader(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;
    let docx = file
        .parse()
        .map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;
    Ok(docx.document.body.text())
}

/// Reduces a client-supplied filename to a safe basename for logs.
pub fn secure_filename(filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
