use crate::Location;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Body of the create and update plant requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDetails {
    pub name: String,
    pub species: String,
    pub description: String,
    pub location: Location,
    pub purchase_date: Date,
}

/// An image file to attach to a plant, sent as the `image` field of a
/// multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type reported by the browser, e.g. `image/png`.
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// MIME type to send, falling back to a generic binary type when the
    /// browser could not tell.
    pub fn content_type(&self) -> &str {
        if self.mime_type.is_empty() {
            "application/octet-stream"
        } else {
            &self.mime_type
        }
    }
}
