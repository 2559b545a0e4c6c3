use std::io::Cursor;
use std::path::Path;

use anyhow::anyhow;

use crate::error::{Error, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MSWORD_MIME: &str = "application/msword";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFileType {
    Pdf,
    Docx,
}

impl ResumeFileType {
    pub fn extension(self) -> &'static str {
        match self {
            ResumeFileType::Pdf => "pdf",
            ResumeFileType::Docx => "docx",
        }
    }

    /// Resolves the declared media type of an upload. The declared
    /// content type wins; the file extension is consulted only when the
    /// client sent nothing more specific than a generic byte stream.
    pub fn from_upload(content_type: Option<&str>, file_name: &str) -> Result<Self> {
        match content_type {
            Some(PDF_MIME) => return Ok(ResumeFileType::Pdf),
            Some(DOCX_MIME) | Some(MSWORD_MIME) => return Ok(ResumeFileType::Docx),
            Some("application/octet-stream") | None => {}
            Some(other) => return Err(Error::UnsupportedFileType(other.to_string())),
        }

        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(ResumeFileType::Pdf),
            "docx" => Ok(ResumeFileType::Docx),
            "" => Err(Error::UnsupportedFileType(file_name.to_string())),
            other => Err(Error::UnsupportedFileType(format!(".{}", other))),
        }
    }
}

/// Best-effort plain text of the document. A parse failure is an error; a
/// parse that succeeds with no text is an empty string, which the scoring
/// pipeline handles as a minimum-score resume.
pub fn extract_text(data: &[u8], file_type: ResumeFileType) -> Result<String> {
    match file_type {
        ResumeFileType::Pdf => extract_pdf_text(data),
        ResumeFileType::Docx => extract_docx_text(data),
    }
}

fn extract_pdf_text(data: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_from(Cursor::new(data))
        .map_err(|e| Error::ExtractionFailed(anyhow!("invalid PDF: {}", e)))?;
    if doc.is_encrypted() {
        return Err(Error::ExtractionFailed(anyhow!("PDF is password protected")));
    }

    let mut text = String::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                tracing::warn!("failed to extract text from PDF page {}: {}", page_num, e);
            }
        }
    }
    Ok(text.trim().to_string())
}

fn extract_docx_text(data: &[u8]) -> Result<String> {
    let docx = docx_rs::read_docx(data)
        .map_err(|e| Error::ExtractionFailed(anyhow!("invalid DOCX: {}", e)))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    #[test]
    fn resolves_declared_mime_types() {
        assert_eq!(
            ResumeFileType::from_upload(Some(PDF_MIME), "resume.bin").unwrap(),
            ResumeFileType::Pdf
        );
        assert_eq!(
            ResumeFileType::from_upload(Some(DOCX_MIME), "resume.bin").unwrap(),
            ResumeFileType::Docx
        );
        assert_eq!(
            ResumeFileType::from_upload(Some(MSWORD_MIME), "resume.bin").unwrap(),
            ResumeFileType::Docx
        );
    }

    #[test]
    fn falls_back_to_extension_for_generic_streams() {
        assert_eq!(
            ResumeFileType::from_upload(Some("application/octet-stream"), "cv.PDF").unwrap(),
            ResumeFileType::Pdf
        );
        assert_eq!(
            ResumeFileType::from_upload(None, "cv.docx").unwrap(),
            ResumeFileType::Docx
        );
    }

    #[test]
    fn rejects_unsupported_types() {
        let err = ResumeFileType::from_upload(Some("text/plain"), "resume.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));

        let err = ResumeFileType::from_upload(None, "resume.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn corrupt_pdf_fails_extraction() {
        let err = extract_text(b"definitely not a pdf", ResumeFileType::Pdf).unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed(_)));
    }

    #[test]
    fn corrupt_docx_fails_extraction() {
        let err = extract_text(b"definitely not a docx", ResumeFileType::Docx).unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed(_)));
    }

    #[test]
    fn docx_round_trip_preserves_paragraph_text() {
        let mut buf = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(
                Run::new().add_text("Education: B.Tech in Computer Science"),
            ))
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text("Skills: rust, docker, postgresql")),
            )
            .build()
            .pack(&mut buf)
            .expect("pack docx");

        let text = extract_text(buf.get_ref(), ResumeFileType::Docx).expect("extract docx");
        assert!(text.contains("B.Tech in Computer Science"));
        assert!(text.contains("rust, docker, postgresql"));
        assert_eq!(text.lines().count(), 2);
    }
}
