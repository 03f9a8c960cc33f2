//! Upload allow-list and content sniffing.
//!
//! Profile images and identity proofs are the only files the platform
//! accepts: JPEG, PNG, or PDF, capped at 2 MiB. The declared content type
//! is checked against the file's leading bytes so a renamed file cannot
//! slip past the allow-list.

use crate::error::CoreError;

/// Maximum accepted upload size in bytes (2 MiB).
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Accepted upload content types.
pub const ALLOWED_UPLOAD_TYPES: &[&str] = &["image/jpeg", "image/png", "application/pdf"];

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const PDF_MAGIC: &[u8] = b"%PDF-";

/// File extension used when storing an upload of the given content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

/// Detect the content type from a file's leading bytes.
fn sniff_content_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(JPEG_MAGIC) {
        Some("image/jpeg")
    } else if bytes.starts_with(PNG_MAGIC) {
        Some("image/png")
    } else if bytes.starts_with(PDF_MAGIC) {
        Some("application/pdf")
    } else {
        None
    }
}

/// Validate an upload against the allow-list and size cap.
///
/// Returns the storage extension for the file on success. The declared
/// content type must be allow-listed AND match what the bytes actually are.
pub fn validate_upload(declared_type: &str, bytes: &[u8]) -> Result<&'static str, CoreError> {
    if !ALLOWED_UPLOAD_TYPES.contains(&declared_type) {
        return Err(CoreError::Validation(format!(
            "Unsupported file type '{declared_type}'. Allowed: {}",
            ALLOWED_UPLOAD_TYPES.join(", ")
        )));
    }

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "File exceeds the maximum size of {MAX_UPLOAD_BYTES} bytes"
        )));
    }

    if bytes.is_empty() {
        return Err(CoreError::Validation("Uploaded file is empty".to_string()));
    }

    match sniff_content_type(bytes) {
        Some(actual) if actual == declared_type => {
            // extension_for cannot fail here: declared_type passed the allow-list.
            extension_for(declared_type)
                .ok_or_else(|| CoreError::Internal("Unmapped upload type".to_string()))
        }
        Some(actual) => Err(CoreError::Validation(format!(
            "File content does not match declared type '{declared_type}' (detected '{actual}')"
        ))),
        None => Err(CoreError::Validation(
            "File content is not a recognized JPEG, PNG, or PDF".to_string(),
        )),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(&[0u8; 64]);
        bytes
    }

    fn jpeg_bytes() -> Vec<u8> {
        let mut bytes = JPEG_MAGIC.to_vec();
        bytes.extend_from_slice(&[0u8; 64]);
        bytes
    }

    #[test]
    fn test_png_upload_accepted() {
        assert_eq!(validate_upload("image/png", &png_bytes()).unwrap(), "png");
    }

    #[test]
    fn test_jpeg_upload_accepted() {
        assert_eq!(validate_upload("image/jpeg", &jpeg_bytes()).unwrap(), "jpg");
    }

    #[test]
    fn test_pdf_upload_accepted() {
        let bytes = b"%PDF-1.7 rest of document".to_vec();
        assert_eq!(validate_upload("application/pdf", &bytes).unwrap(), "pdf");
    }

    #[test]
    fn test_disallowed_type_rejected() {
        let result = validate_upload("image/gif", &png_bytes());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unsupported file type"));
    }

    #[test]
    fn test_mismatched_content_rejected() {
        // PNG bytes declared as JPEG.
        let result = validate_upload("image/jpeg", &png_bytes());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not match"));
    }

    #[test]
    fn test_unrecognized_content_rejected() {
        let result = validate_upload("image/png", b"not an image at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.resize(MAX_UPLOAD_BYTES + 1, 0);
        let result = validate_upload("image/png", &bytes);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("maximum size"));
    }

    #[test]
    fn test_empty_upload_rejected() {
        assert!(validate_upload("image/png", &[]).is_err());
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("application/pdf"), Some("pdf"));
        assert_eq!(extension_for("text/plain"), None);
    }
}
