use async_trait::async_trait;

use crate::domain::{models::Bio, ServiceError};

#[async_trait]
pub trait BioRepository: Send + Sync + 'static {
    async fn get_bio(&self) -> Result<Bio, ServiceError>;
}
