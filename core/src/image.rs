// Image payload helpers

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// MIME type used for webcam captures
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Encode raw image bytes as a `data:` URL
///
/// # Arguments
/// * `bytes` - Encoded image (JPEG, PNG, ...)
/// * `mime` - MIME type written into the URL header
///
/// # Returns
/// `data:<mime>;base64,<payload>`, the format `/predict` accepts
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
