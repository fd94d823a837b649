use async_trait::async_trait;
use url::Url;

use crate::domain::{
    models::{FilterSpec, Image},
    ServiceError,
};

#[async_trait]
pub trait ImageService: Send + Sync + 'static {
    async fn get_remote_image(&self, url: &Url) -> Result<Image, ServiceError>;
}

#[async_trait]
pub trait ImageFilterService: Send + Sync + 'static {
    /// Applies `filters` in order and returns the resulting image.
    async fn apply_filters(
        &self,
        image: &Image,
        filters: &[FilterSpec],
    ) -> Result<Image, ServiceError>;
}
