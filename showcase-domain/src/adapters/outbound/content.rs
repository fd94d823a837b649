//! In-memory bio and template repositories, typically filled from settings.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{
    models::{Bio, RichTextTemplate, TemplateName},
    ports::outbound::{BioRepository, TemplateRepository},
    ServiceError,
};

#[derive(Debug, Clone)]
pub struct StaticBioRepository {
    bio: Bio,
}

impl StaticBioRepository {
    pub fn new(bio: Bio) -> Self {
        Self { bio }
    }
}

#[async_trait]
impl BioRepository for StaticBioRepository {
    async fn get_bio(&self) -> Result<Bio, ServiceError> {
        Ok(self.bio.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticTemplateRepository {
    templates: HashMap<TemplateName, RichTextTemplate>,
}

impl StaticTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: TemplateName, template: RichTextTemplate) -> Self {
        self.templates.insert(name, template);
        self
    }
}

impl FromIterator<(TemplateName, RichTextTemplate)> for StaticTemplateRepository {
    fn from_iter<I: IntoIterator<Item = (TemplateName, RichTextTemplate)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl TemplateRepository for StaticTemplateRepository {
    async fn get_template(&self, name: TemplateName) -> Result<RichTextTemplate, ServiceError> {
        self.templates
            .get(&name)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("template `{name}`")))
    }
}
