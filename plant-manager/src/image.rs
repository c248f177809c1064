use base64::{Engine as _, engine::general_purpose};
use payloads::requests::ImageUpload;

/// An image chosen in the form but not uploaded yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImage {
    pub upload: ImageUpload,
    /// Inline `data:` URL for the preview thumbnail. It is owned by this value,
    /// so replacing the selection needs no cleanup.
    pub preview_url: String,
}

impl PendingImage {
    pub fn new(upload: ImageUpload) -> Self {
        let preview_url = data_url(upload.content_type(), &upload.data);
        Self {
            upload,
            preview_url,
        }
    }
}

pub fn data_url(mime_type: &str, data: &[u8]) -> String {
    format!(
        "data:{mime_type};base64,{}",
        general_purpose::STANDARD.encode(data)
    )
}
