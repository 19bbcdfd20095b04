//! Document ingestion — file-type dispatch and text extraction.
//!
//! Parsing itself is delegated: `pdf-extract` for PDF, a zip + quick-xml
//! walk for DOCX, plain UTF-8 decoding for TXT. This module only decides
//! which path a payload takes and normalizes the result.

use anyhow::anyhow;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

mod docx;

/// The document formats accepted for resume and job description uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    /// Resolves a kind from a multipart content type, e.g. `application/pdf`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(DocumentKind::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DocumentKind::Docx)
            }
            "text/plain" => Some(DocumentKind::Txt),
            _ => None,
        }
    }

    /// Fallback resolution from the uploaded file name's extension.
    /// Browsers and curl do not always send a useful content type.
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())?;
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Txt),
            _ => None,
        }
    }

    /// Content-type first, file name second.
    pub fn resolve(mime: Option<&str>, filename: Option<&str>) -> Option<Self> {
        mime.and_then(Self::from_mime)
            .or_else(|| filename.and_then(Self::from_filename))
    }
}

/// Extracts plain text from an uploaded document.
///
/// Returns `UnprocessableEntity` when the document parses but yields no
/// usable text (e.g. a scanned PDF with no text layer).
pub fn extract_text(kind: DocumentKind, data: &Bytes) -> Result<String, AppError> {
    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Internal(anyhow!("PDF extraction failed: {e}")))?,
        DocumentKind::Docx => docx::extract_docx_text(data)?,
        DocumentKind::Txt => String::from_utf8_lossy(data).into_owned(),
    };

    let text = normalize_text(&text);
    debug!("Extracted {} chars from {:?} document", text.len(), kind);

    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "The document contains no extractable text".to_string(),
        ));
    }

    Ok(text)
}

/// Collapses runs of blank lines and trims trailing whitespace per line.
/// PDF extraction in particular leaves ragged spacing behind.
fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;

    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(
            DocumentKind::from_mime("application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::from_mime("text/plain"), Some(DocumentKind::Txt));
        assert_eq!(DocumentKind::from_mime("image/png"), None);
    }

    #[test]
    fn test_kind_from_filename_fallback() {
        assert_eq!(
            DocumentKind::resolve(Some("application/octet-stream"), Some("resume.PDF")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::resolve(None, Some("notes.docx")),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::resolve(None, Some("archive.zip")), None);
        assert_eq!(DocumentKind::resolve(None, None), None);
    }

    #[test]
    fn test_extract_txt() {
        let data = Bytes::from_static(b"Jane Doe\nRust Engineer\n");
        let text = extract_text(DocumentKind::Txt, &data).unwrap();
        assert_eq!(text, "Jane Doe\nRust Engineer");
    }

    #[test]
    fn test_extract_empty_txt_is_unprocessable() {
        let data = Bytes::from_static(b"   \n\n  ");
        let err = extract_text(DocumentKind::Txt, &data).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let raw = "Line one   \n\n\n\nLine two\n";
        assert_eq!(normalize_text(raw), "Line one\n\nLine two");
    }
}
