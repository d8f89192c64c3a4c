use crate::ValidationError;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const SUPPORTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Check an upload's declared type and size. The first failing rule wins.
pub fn validate_image_file(mime_type: &str, byte_len: u64) -> Result<(), ValidationError> {
    if !mime_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }

    if byte_len > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge);
    }

    if !SUPPORTED_MIME_TYPES.contains(&mime_type) {
        return Err(ValidationError::UnsupportedType);
    }

    Ok(())
}
