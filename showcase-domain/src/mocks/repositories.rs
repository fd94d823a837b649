//! Mock bio and template repositories.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    models::{Bio, RichTextTemplate, TemplateName},
    ports::outbound::{BioRepository, TemplateRepository},
    ServiceError,
};

#[derive(Clone)]
pub struct MockBioRepository {
    response: Arc<RwLock<Result<Bio, ServiceError>>>,
    latency: Option<Duration>,
    call_count: Arc<AtomicUsize>,
}

impl MockBioRepository {
    pub fn returning(bio: Bio) -> Self {
        Self::with_response(Ok(bio))
    }

    pub fn failing(error: ServiceError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<Bio, ServiceError>) -> Self {
        Self {
            response: Arc::new(RwLock::new(response)),
            latency: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delay every fetch by `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_response(&self, response: Result<Bio, ServiceError>) {
        *self.response.write().unwrap() = response;
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BioRepository for MockBioRepository {
    async fn get_bio(&self) -> Result<Bio, ServiceError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.response.read().unwrap().clone()
    }
}

/// Mock template repository backed by an in-memory map.
///
/// Names without a configured response fail with [`ServiceError::NotFound`].
///
/// # Examples
///
/// ```ignore
/// let repo = MockTemplateRepository::new()
///     .with_template(TemplateName::Bio, "%name%")
///     .with_failure(TemplateName::BioLink, ServiceError::unknown("offline"));
/// ```
#[derive(Clone, Default)]
pub struct MockTemplateRepository {
    responses: Arc<RwLock<HashMap<TemplateName, Result<RichTextTemplate, ServiceError>>>>,
    latencies: HashMap<TemplateName, Duration>,
    requested: Arc<RwLock<Vec<TemplateName>>>,
}

impl MockTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(self, name: TemplateName, source: &str) -> Self {
        self.set_response(name, Ok(RichTextTemplate::new(source)));
        self
    }

    pub fn with_failure(self, name: TemplateName, error: ServiceError) -> Self {
        self.set_response(name, Err(error));
        self
    }

    /// Delay fetches of `name` by `latency` before answering.
    pub fn with_latency(mut self, name: TemplateName, latency: Duration) -> Self {
        self.latencies.insert(name, latency);
        self
    }

    pub fn set_response(&self, name: TemplateName, response: Result<RichTextTemplate, ServiceError>) {
        self.responses.write().unwrap().insert(name, response);
    }

    pub fn call_count(&self) -> usize {
        self.requested.read().unwrap().len()
    }

    /// Template names requested so far, in call order.
    pub fn requested(&self) -> Vec<TemplateName> {
        self.requested.read().unwrap().clone()
    }
}

#[async_trait]
impl TemplateRepository for MockTemplateRepository {
    async fn get_template(&self, name: TemplateName) -> Result<RichTextTemplate, ServiceError> {
        self.requested.write().unwrap().push(name);
        if let Some(latency) = self.latencies.get(&name) {
            tokio::time::sleep(*latency).await;
        }
        self.responses
            .read()
            .unwrap()
            .get(&name)
            .cloned()
            .unwrap_or_else(|| Err(ServiceError::NotFound(format!("template `{name}`"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_template_is_not_found() {
        let repo = MockTemplateRepository::new().with_template(TemplateName::Bio, "%name%");

        assert!(repo.get_template(TemplateName::Bio).await.is_ok());
        assert_eq!(
            repo.get_template(TemplateName::BioLink).await,
            Err(ServiceError::NotFound("template `bio-link`".into()))
        );
        assert_eq!(repo.requested(), vec![TemplateName::Bio, TemplateName::BioLink]);
    }

    #[tokio::test]
    async fn bio_repository_response_can_be_swapped() {
        let repo = MockBioRepository::returning(crate::mocks::bio());
        assert!(repo.get_bio().await.is_ok());

        repo.set_response(Err(ServiceError::unknown("gone")));
        assert_eq!(repo.get_bio().await, Err(ServiceError::unknown("gone")));
        assert_eq!(repo.call_count(), 2);
    }

    #[tokio::test]
    async fn latency_delays_only_the_configured_template() {
        let repo = MockTemplateRepository::new()
            .with_template(TemplateName::Bio, "%name%")
            .with_template(TemplateName::BioLink, "%link%")
            .with_latency(TemplateName::Bio, Duration::from_millis(50));
        let started = std::time::Instant::now();

        repo.get_template(TemplateName::BioLink).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(50));

        repo.get_template(TemplateName::Bio).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
