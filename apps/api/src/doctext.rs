//! Document-to-text collaborator: turns an uploaded résumé into plain text
//! before any extraction runs. Conversion failures are signaled here, never
//! inside the extractor.

use bytes::Bytes;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    /// Legacy binary Word. Handled best-effort: conversion may yield empty
    /// text rather than failing.
    Doc,
    PlainText,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(DocumentKind::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DocumentKind::Docx)
            }
            "application/msword" => Some(DocumentKind::Doc),
            "text/plain" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

/// Extracts plain text from an uploaded document. Empty output is legal
/// (the extractor tolerates it); an unparseable document is an error.
pub fn extract_text(kind: DocumentKind, data: &Bytes) -> Result<String, AppError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Document(format!("failed to extract PDF text: {e}"))),
        DocumentKind::PlainText => Ok(String::from_utf8_lossy(data).into_owned()),
        // No pure-Rust reader exists for the legacy binary format; return
        // empty text and let downstream field collection fill the gaps.
        DocumentKind::Doc => Ok(String::new()),
        DocumentKind::Docx => Err(AppError::Document(
            "cannot parse DOCX documents; upload a PDF or plain-text résumé".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_mapping() {
        assert_eq!(
            DocumentKind::from_mime("application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_mime("application/msword"),
            Some(DocumentKind::Doc)
        );
        assert_eq!(DocumentKind::from_mime("image/png"), None);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let data = Bytes::from_static(b"Jane Doe\njane@example.com");
        let text = extract_text(DocumentKind::PlainText, &data).unwrap();
        assert!(text.contains("jane@example.com"));
    }

    #[test]
    fn test_legacy_doc_degrades_to_empty_text() {
        let data = Bytes::from_static(b"\xd0\xcf\x11\xe0 binary soup");
        assert_eq!(extract_text(DocumentKind::Doc, &data).unwrap(), "");
    }

    #[test]
    fn test_docx_is_rejected() {
        let data = Bytes::from_static(b"PK\x03\x04");
        assert!(extract_text(DocumentKind::Docx, &data).is_err());
    }
}
