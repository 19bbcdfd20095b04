//! DOCX text extraction.
//!
//! A .docx file is a zip container; the document body lives in
//! `word/document.xml`. We pull text runs (`w:t`) with a streaming XML
//! reader, emitting a newline at each paragraph end and a tab for `w:tab`.

use std::io::{Cursor, Read};

use anyhow::anyhow;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::AppError;

pub fn extract_docx_text(data: &[u8]) -> Result<String, AppError> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| AppError::UnprocessableEntity(format!("Not a valid DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| {
            AppError::UnprocessableEntity(
                "DOCX archive is missing word/document.xml".to_string(),
            )
        })?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Internal(anyhow!("Failed to read DOCX body: {e}")))?;

    parse_document_xml(&xml)
}

/// Walks the WordprocessingML body and flattens it to plain text.
fn parse_document_xml(xml: &str) -> Result<String, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let run = t
                    .unescape()
                    .map_err(|e| AppError::UnprocessableEntity(format!("Malformed DOCX XML: {e}")))?;
                text.push_str(&run);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AppError::UnprocessableEntity(format!(
                    "Malformed DOCX XML: {e}"
                )))
            }
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Rust</w:t><w:tab/><w:t>Engineer</w:t></w:r></w:p>
    <w:p/>
  </w:body>
</w:document>"#;

    #[test]
    fn test_parse_document_xml_paragraphs_and_tabs() {
        let text = parse_document_xml(SAMPLE).unwrap();
        assert_eq!(text, "Jane Doe\nRust\tEngineer\n\n");
    }

    #[test]
    fn test_parse_document_xml_unescapes_entities() {
        let xml = r#"<w:document xmlns:w="ns"><w:body><w:p><w:r><w:t>C &amp; Rust</w:t></w:r></w:p></w:body></w:document>"#;
        let text = parse_document_xml(xml).unwrap();
        assert_eq!(text, "C & Rust\n");
    }

    #[test]
    fn test_non_zip_payload_is_unprocessable() {
        let err = extract_docx_text(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
