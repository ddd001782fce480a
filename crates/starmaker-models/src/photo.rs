//! Uploaded photos and the feature tags extracted from them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user photo used as a character reference.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Photo {
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Convenience constructor for JPEG uploads.
    pub fn jpeg(id: impl Into<String>, data: Vec<u8>) -> Self {
        let id = id.into();
        let file_name = format!("{}.jpg", id);
        Self::new(id, file_name, "image/jpeg", data)
    }
}

impl std::fmt::Debug for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Photo")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Coarse feature tags for one photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFeatureSet {
    /// Id of the analyzed photo
    pub photo_id: String,
    /// Age bracket, e.g. "25-35"
    pub age_range: String,
    pub gender: String,
    pub emotions: Vec<String>,
    pub facial_features: Vec<String>,
    pub lighting: String,
    pub quality: String,
}
