use async_trait::async_trait;

use super::{Result, UploadRequest, UploadedMedia};

/// A hosted media service that turns bytes into a public URL.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Uploads the request payload and returns where it can be fetched.
    async fn upload(&self, request: UploadRequest) -> Result<UploadedMedia>;
}
