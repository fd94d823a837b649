use async_trait::async_trait;

use crate::domain::{
    models::{RichTextTemplate, TemplateName},
    ServiceError,
};

#[async_trait]
pub trait TemplateRepository: Send + Sync + 'static {
    async fn get_template(&self, name: TemplateName) -> Result<RichTextTemplate, ServiceError>;
}

