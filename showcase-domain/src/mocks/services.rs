//! Mock image collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::domain::{
    models::{FilterSpec, Image},
    ports::outbound::{ImageFilterService, ImageService},
    ServiceError,
};

/// Mock image service returning a configurable result.
///
/// # Examples
///
/// ```ignore
/// let service = MockImageService::returning(image("original"));
/// // later, make the next fetch fail
/// service.set_response(Err(ServiceError::unknown("offline")));
/// ```
#[derive(Clone)]
pub struct MockImageService {
    response: Arc<RwLock<Result<Image, ServiceError>>>,
    requested: Arc<RwLock<Vec<Url>>>,
}

impl MockImageService {
    pub fn returning(image: Image) -> Self {
        Self::with_response(Ok(image))
    }

    pub fn failing(error: ServiceError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<Image, ServiceError>) -> Self {
        Self {
            response: Arc::new(RwLock::new(response)),
            requested: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the result returned by subsequent fetches.
    pub fn set_response(&self, response: Result<Image, ServiceError>) {
        *self.response.write().unwrap() = response;
    }

    pub fn call_count(&self) -> usize {
        self.requested.read().unwrap().len()
    }

    /// URLs requested so far, in call order.
    pub fn requested_urls(&self) -> Vec<Url> {
        self.requested.read().unwrap().clone()
    }
}

#[async_trait]
impl ImageService for MockImageService {
    async fn get_remote_image(&self, url: &Url) -> Result<Image, ServiceError> {
        self.requested.write().unwrap().push(url.clone());
        self.response.read().unwrap().clone()
    }
}

/// Deterministic stand-in for a filtered image.
///
/// Appends a textual description of every filter to the source bytes so
/// tests can tell variants apart.
pub fn filtered_image(image: &Image, filters: &[FilterSpec]) -> Image {
    let mut bytes = image.bytes.clone();
    for filter in filters {
        let step = match filter {
            FilterSpec::Circle => "|circle".to_string(),
            FilterSpec::Pixellate { scale } => format!("|pixellate-{scale}"),
        };
        bytes.extend_from_slice(step.as_bytes());
    }
    Image::new(bytes, image.mime_type.clone())
}

fn pixellate_scale(filters: &[FilterSpec]) -> Option<u32> {
    filters.iter().find_map(|filter| match filter {
        FilterSpec::Pixellate { scale } => Some(*scale),
        FilterSpec::Circle => None,
    })
}

/// Mock filter service producing [`filtered_image`] outputs.
///
/// Can be told to fail for one pixellation scale and to delay responses per
/// scale, which lets tests control completion order.
#[derive(Clone, Default)]
pub struct MockImageFilterService {
    failure: Arc<RwLock<Option<(u32, ServiceError)>>>,
    latency: Option<fn(u32) -> Duration>,
    calls: Arc<RwLock<Vec<Vec<FilterSpec>>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockImageFilterService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every chain that pixellates at `scale`.
    pub fn failing_at_scale(self, scale: u32, error: ServiceError) -> Self {
        *self.failure.write().unwrap() = Some((scale, error));
        self
    }

    /// Delay each chain by `latency(scale)` before answering.
    pub fn with_latency(mut self, latency: fn(u32) -> Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn clear_failure(&self) {
        *self.failure.write().unwrap() = None;
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Filter chains received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<FilterSpec>> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ImageFilterService for MockImageFilterService {
    async fn apply_filters(
        &self,
        image: &Image,
        filters: &[FilterSpec],
    ) -> Result<Image, ServiceError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.write().unwrap().push(filters.to_vec());

        let scale = pixellate_scale(filters);
        if let (Some(latency), Some(scale)) = (self.latency, scale) {
            tokio::time::sleep(latency(scale)).await;
        }

        let failure = self.failure.read().unwrap().clone();
        match failure {
            Some((failing, error)) if scale == Some(failing) => Err(error),
            _ => Ok(filtered_image(image, filters)),
        }
    }
}
