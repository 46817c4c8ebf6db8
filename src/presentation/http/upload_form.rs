use axum::extract::Multipart;

use crate::application::use_cases::documents::upload_document::DocumentUpload;
use crate::presentation::http::error::AppError;

/// Reads the `multipart/form-data` body of a document upload and validates
/// every field before anything touches the store.
///
/// Fields:
/// - `file`: binary (required, at most `max_bytes`)
/// - `title`: text
/// - `tags`: JSON array of strings, as text
/// - `isPublic`: `"true"` / `"false"`
/// - `userId`: numeric text
pub async fn read_upload_form(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<DocumentUpload, AppError> {
    let mut upload = DocumentUpload::default();
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                upload.filename = field.file_name().map(|s| s.to_string());
                if let Some(name) = upload.filename.as_deref() {
                    reject_nul("file", name)?;
                }
                upload.content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await?;
                if data.len() > max_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "file: exceeds the {max_bytes} byte upload limit"
                    )));
                }
                file_bytes = Some(data.to_vec());
            }
            Some("title") => {
                let title = field.text().await?;
                reject_nul("title", &title)?;
                upload.title = Some(title);
            }
            Some("tags") => upload.tags = parse_tags(&field.text().await?)?,
            Some("isPublic") => upload.is_public = parse_is_public(&field.text().await?),
            Some("userId") => upload.owner_id = parse_user_id(&field.text().await?),
            _ => { /* ignore additional fields */ }
        }
    }

    upload.bytes = file_bytes.ok_or_else(|| AppError::bad_request("No file uploaded"))?;
    Ok(upload)
}

/// Blank means no tags; anything else must be a JSON array of strings.
pub fn parse_tags(raw: &str) -> Result<Vec<String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let tags = serde_json::from_str::<Vec<String>>(raw)
        .map_err(|e| AppError::bad_request(format!("tags: expected a JSON array of strings ({e})")))?;
    for tag in &tags {
        reject_nul("tags", tag)?;
    }
    Ok(tags)
}

// Stored text columns cannot hold U+0000.
pub fn reject_nul(field: &str, value: &str) -> Result<(), AppError> {
    if value.contains('\0') {
        return Err(AppError::bad_request(format!(
            "{field}: must not contain NUL characters"
        )));
    }
    Ok(())
}

pub fn parse_is_public(raw: &str) -> bool {
    raw.trim() == "true"
}

// Non-numeric or non-positive ids fall back to the caller identity.
pub fn parse_user_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}
