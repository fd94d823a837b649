use std::io::ErrorKind;

use async_trait::async_trait;
use tracing::instrument;
use url::Url;

use crate::domain::{models::Image, ports::outbound::ImageService, ServiceError};

/// Resolves `file://` URLs from the local filesystem.
///
/// Any other scheme is rejected with [`ServiceError::UnsupportedUrl`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageService;

#[async_trait]
impl ImageService for FileImageService {
    #[instrument(name = "FileImageService::get_remote_image", skip(self, url), fields(url = %url))]
    async fn get_remote_image(&self, url: &Url) -> Result<Image, ServiceError> {
        if url.scheme() != "file" {
            return Err(ServiceError::UnsupportedUrl(url.to_string()));
        }

        let path = url
            .to_file_path()
            .map_err(|_| ServiceError::UnsupportedUrl(url.to_string()))?;

        let bytes = tokio::fs::read(&path).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => ServiceError::NotFound(path.display().to_string()),
            _ => ServiceError::from(err),
        })?;

        let format =
            image::guess_format(&bytes).map_err(|err| ServiceError::InvalidImage(err.to_string()))?;

        Ok(Image::new(bytes, format.to_mime_type()))
    }
}
