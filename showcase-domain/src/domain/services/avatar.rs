use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::{
    models::{AvatarOutput, FilterSpec, Image},
    ports::{
        inbound::{AvatarAction, UseCase},
        outbound::{ImageFilterService, ImageService},
    },
    Action, ServiceError,
};

/// Pixellation scales to render, as an inclusive arithmetic range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixellateConfig {
    pub start: u32,
    /// Inclusive upper bound.
    pub end: u32,
    pub step: u32,
}

impl Default for PixellateConfig {
    fn default() -> Self {
        Self {
            start: 1,
            end: 20,
            step: 3,
        }
    }
}

impl PixellateConfig {
    /// Scales in ascending order. A zero step is treated as 1.
    pub fn scales(&self) -> Vec<u32> {
        (self.start..=self.end)
            .step_by(self.step.max(1) as usize)
            .collect()
    }
}

/// Implementation of the AvatarUseCase inbound port.
///
/// Fetches the source image once, then renders one circle-cropped,
/// pixellated variant per configured scale. All variants are requested
/// concurrently and joined all-or-nothing.
pub struct AvatarUseCaseImpl<I, F> {
    image_service: Arc<I>,
    filter_service: Arc<F>,
    config: PixellateConfig,
}

impl<I: ImageService, F: ImageFilterService> AvatarUseCaseImpl<I, F> {
    pub fn new(image_service: Arc<I>, filter_service: Arc<F>) -> Self {
        Self::with_config(image_service, filter_service, PixellateConfig::default())
    }

    pub fn with_config(
        image_service: Arc<I>,
        filter_service: Arc<F>,
        config: PixellateConfig,
    ) -> Self {
        Self {
            image_service,
            filter_service,
            config,
        }
    }
}

impl<I: ImageService, F: ImageFilterService> UseCase for AvatarUseCaseImpl<I, F> {
    type Input = Url;
    type Output = AvatarAction;

    fn execute(&self, url: Url) -> AvatarAction {
        let image_service = Arc::clone(&self.image_service);
        let filter_service = Arc::clone(&self.filter_service);
        let scales = self.config.scales();

        Action::new(move || {
            let image_service = Arc::clone(&image_service);
            let filter_service = Arc::clone(&filter_service);
            let scales = scales.clone();
            let url = url.clone();

            async move {
                build_avatar(image_service.as_ref(), filter_service.as_ref(), &url, &scales).await
            }
        })
    }
}

#[instrument(
    name = "AvatarUseCase::execute",
    skip(image_service, filter_service, url, scales),
    fields(url = %url)
)]
async fn build_avatar<I: ImageService, F: ImageFilterService>(
    image_service: &I,
    filter_service: &F,
    url: &Url,
    scales: &[u32],
) -> Result<AvatarOutput, ServiceError> {
    let original = image_service.get_remote_image(url).await?;

    let mut variants = try_join_all(
        scales
            .iter()
            .map(|&scale| pixellate(filter_service, &original, scale)),
    )
    .await?;

    // Completion order must never leak into the output.
    variants.sort_by(|(a, _), (b, _)| b.cmp(a));
    let pixelized = variants
        .into_iter()
        .map(|(_, image)| image)
        .collect::<Vec<_>>();

    debug!(variants = pixelized.len(), "avatar pixellated");

    let avatar = pixelized.first().cloned().unwrap_or(original);
    Ok(AvatarOutput::new(avatar, pixelized))
}

async fn pixellate<F: ImageFilterService>(
    filter_service: &F,
    image: &Image,
    scale: u32,
) -> Result<(u32, Image), ServiceError> {
    let filters = [FilterSpec::Circle, FilterSpec::Pixellate { scale }];
    let filtered = filter_service.apply_filters(image, &filters).await?;

    Ok((scale, filtered))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::mocks::{filtered_image, image, MockImageFilterService, MockImageService};

    fn url() -> Url {
        Url::parse("https://example.com/me.png").unwrap()
    }

    fn expected_variant(scale: u32) -> Image {
        filtered_image(
            &image("original"),
            &[FilterSpec::Circle, FilterSpec::Pixellate { scale }],
        )
    }

    fn use_case(
        images: &MockImageService,
        filters: &MockImageFilterService,
    ) -> AvatarUseCaseImpl<MockImageService, MockImageFilterService> {
        AvatarUseCaseImpl::new(Arc::new(images.clone()), Arc::new(filters.clone()))
    }

    #[test]
    fn default_scales_step_by_three_up_to_twenty() {
        assert_eq!(
            PixellateConfig::default().scales(),
            vec![1, 4, 7, 10, 13, 16, 19]
        );
    }

    #[test]
    fn zero_step_is_clamped() {
        let config = PixellateConfig {
            start: 2,
            end: 4,
            step: 0,
        };

        assert_eq!(config.scales(), vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn produces_seven_variants_in_descending_scale_order() {
        let images = MockImageService::returning(image("original"));
        let filters = MockImageFilterService::new();

        let output = use_case(&images, &filters)
            .execute(url())
            .execute()
            .await
            .unwrap();

        let expected = [19, 16, 13, 10, 7, 4, 1]
            .into_iter()
            .map(expected_variant)
            .collect::<Vec<_>>();
        assert_eq!(output.pixelized, expected);
        assert_eq!(output.avatar, output.pixelized[0]);
        assert_eq!(images.requested_urls(), vec![url()]);
        assert_eq!(filters.call_count(), 7);
    }

    #[tokio::test]
    async fn every_variant_is_circle_cropped_then_pixellated() {
        let images = MockImageService::returning(image("original"));
        let filters = MockImageFilterService::new();

        use_case(&images, &filters)
            .execute(url())
            .execute()
            .await
            .unwrap();

        let mut calls = filters.calls();
        calls.sort_by_key(|chain| match chain[1] {
            FilterSpec::Pixellate { scale } => scale,
            FilterSpec::Circle => 0,
        });
        let expected = [1, 4, 7, 10, 13, 16, 19]
            .into_iter()
            .map(|scale| vec![FilterSpec::Circle, FilterSpec::Pixellate { scale }])
            .collect::<Vec<_>>();
        assert_eq!(calls, expected);
    }

    #[tokio::test]
    async fn completion_order_does_not_affect_output_order() {
        let images = MockImageService::returning(image("original"));
        // Small scales answer last.
        let filters = MockImageFilterService::new()
            .with_latency(|scale| Duration::from_millis(u64::from(20 - scale) * 2));

        let output = use_case(&images, &filters)
            .execute(url())
            .execute()
            .await
            .unwrap();

        assert_eq!(output.pixelized.first(), Some(&expected_variant(19)));
        assert_eq!(output.pixelized.last(), Some(&expected_variant(1)));
    }

    #[tokio::test]
    async fn fetch_failure_skips_filtering() {
        let images = MockImageService::failing(ServiceError::unknown("offline"));
        let filters = MockImageFilterService::new();

        let result = use_case(&images, &filters).execute(url()).execute().await;

        assert_eq!(result, Err(ServiceError::unknown("offline")));
        assert_eq!(filters.call_count(), 0);
    }

    #[tokio::test]
    async fn single_filter_failure_fails_the_action() {
        let images = MockImageService::returning(image("original"));
        let filters = MockImageFilterService::new()
            .failing_at_scale(10, ServiceError::InvalidImage("corrupt".into()));

        let result = use_case(&images, &filters).execute(url()).execute().await;

        assert_eq!(result, Err(ServiceError::InvalidImage("corrupt".into())));
    }

    #[tokio::test]
    async fn building_the_action_does_not_fetch() {
        let images = MockImageService::returning(image("original"));
        let filters = MockImageFilterService::new();

        let _action = use_case(&images, &filters).execute(url());

        assert_eq!(images.call_count(), 0);
        assert_eq!(filters.call_count(), 0);
    }

    #[tokio::test]
    async fn reexecution_reflects_latest_collaborator_outcome() {
        let images = MockImageService::returning(image("original"));
        let filters = MockImageFilterService::new();
        let action = use_case(&images, &filters).execute(url());

        assert!(action.execute().await.is_ok());

        images.set_response(Err(ServiceError::unknown("offline")));
        assert_eq!(action.execute().await, Err(ServiceError::unknown("offline")));

        images.set_response(Ok(image("updated")));
        let output = action.execute().await.unwrap();
        assert_eq!(
            output.avatar,
            filtered_image(
                &image("updated"),
                &[FilterSpec::Circle, FilterSpec::Pixellate { scale: 19 }]
            )
        );
        assert_eq!(images.call_count(), 3);
        assert_eq!(filters.call_count(), 14);
    }

    #[tokio::test]
    async fn recovered_filter_service_is_seen_on_next_execution() {
        let images = MockImageService::returning(image("original"));
        let filters =
            MockImageFilterService::new().failing_at_scale(1, ServiceError::unknown("busy"));
        let action = use_case(&images, &filters).execute(url());

        assert!(action.execute().await.is_err());

        filters.clear_failure();
        assert_eq!(action.execute().await.unwrap().pixelized.len(), 7);
    }

    #[tokio::test]
    async fn empty_scale_range_falls_back_to_original() {
        let images = MockImageService::returning(image("original"));
        let filters = MockImageFilterService::new();
        let config = PixellateConfig {
            start: 5,
            end: 1,
            step: 1,
        };
        let use_case =
            AvatarUseCaseImpl::with_config(Arc::new(images), Arc::new(filters.clone()), config);

        let output = use_case.execute(url()).execute().await.unwrap();

        assert_eq!(output.avatar, image("original"));
        assert!(output.pixelized.is_empty());
        assert_eq!(filters.call_count(), 0);
    }
}
