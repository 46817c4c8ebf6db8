//! Text extraction policy for uploaded files.
//!
//! Only `text/plain` is actually decoded. PDFs and every other type are
//! stored with a fixed placeholder so the document still has readable
//! content in listings. NUL characters are dropped from decoded text since
//! Postgres `TEXT` cannot hold them.

pub const PDF_PLACEHOLDER: &str =
    "PDF content extraction not implemented - file uploaded successfully";
pub const UNSUPPORTED_PLACEHOLDER: &str =
    "File uploaded successfully - content extraction not supported for this file type";

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    PlainText,
    Pdf,
    Unsupported,
}

impl ExtractionPolicy {
    pub fn for_mime(mime: &str) -> Self {
        match essence(mime).as_str() {
            "text/plain" => ExtractionPolicy::PlainText,
            "application/pdf" => ExtractionPolicy::Pdf,
            _ => ExtractionPolicy::Unsupported,
        }
    }

    pub fn extract(self, bytes: &[u8]) -> String {
        match self {
            ExtractionPolicy::PlainText => {
                let text = String::from_utf8_lossy(bytes);
                if text.contains('\0') {
                    text.replace('\0', "")
                } else {
                    text.into_owned()
                }
            }
            ExtractionPolicy::Pdf => PDF_PLACEHOLDER.to_string(),
            ExtractionPolicy::Unsupported => UNSUPPORTED_PLACEHOLDER.to_string(),
        }
    }
}

pub fn extract_content(mime: &str, bytes: &[u8]) -> String {
    ExtractionPolicy::for_mime(mime).extract(bytes)
}

/// MIME type recorded for an upload: the declared part type when present,
/// otherwise a guess from the filename extension.
pub fn resolve_mime(declared: Option<&str>, filename: Option<&str>) -> String {
    if let Some(ct) = declared.map(str::trim).filter(|s| !s.is_empty()) {
        return ct.to_string();
    }
    filename
        .map(|name| mime_guess::from_path(name).first_or_octet_stream())
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

// "Text/Plain; charset=utf-8" -> "text/plain"
fn essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
