use serde::{Deserialize, Serialize};

/// Folder that event images are uploaded into.
pub const EVENT_IMAGE_FOLDER: &str = "DevEvent";

/// The kind of asset being uploaded. Event uploads are always images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Image,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
        }
    }
}

/// A single upload: the full payload plus where to file it.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub folder: String,
    pub resource_type: ResourceType,
}

impl UploadRequest {
    /// Creates an image upload into the given folder.
    pub fn image(bytes: Vec<u8>, folder: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: None,
            content_type: None,
            folder: folder.into(),
            resource_type: ResourceType::Image,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("len", &self.bytes.len())
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("folder", &self.folder)
            .field("resource_type", &self.resource_type)
            .finish()
    }
}

/// Where an uploaded asset ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
    /// HTTPS URL of the asset.
    pub secure_url: String,
    /// Service-side identifier of the asset.
    pub public_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_request_defaults() {
        let request = UploadRequest::image(vec![1, 2, 3], EVENT_IMAGE_FOLDER)
            .with_file_name("cover.png")
            .with_content_type("image/png");

        assert_eq!(request.resource_type, ResourceType::Image);
        assert_eq!(request.folder, "DevEvent");
        assert_eq!(request.file_name.as_deref(), Some("cover.png"));
    }

    #[test]
    fn test_resource_type_as_str() {
        assert_eq!(ResourceType::Image.as_str(), "image");
    }
}
