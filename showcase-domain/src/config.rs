use std::{path::Path, str::FromStr};

use config::ConfigError;
use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};
use url::Url;

use crate::{
    adapters::outbound::content::{StaticBioRepository, StaticTemplateRepository},
    domain::{
        models::{Bio, RichTextTemplate, TemplateName},
        services::PixellateConfig,
    },
};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub avatar: AvatarSettings,
    pub content: ContentSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    /// Default `tracing` filter, overridden by `RUST_LOG`.
    pub log_filter: String,
    pub avatar_url: Url,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct AvatarSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub start: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub end: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub step: u32,
}

impl AvatarSettings {
    pub fn pixellate(&self) -> PixellateConfig {
        PixellateConfig {
            start: self.start,
            end: self.end,
            step: self.step,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ContentSettings {
    pub bio: Bio,
    pub templates: TemplateSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TemplateSettings {
    pub bio: String,
    pub bio_link: String,
}

impl ContentSettings {
    pub fn bio_repository(&self) -> StaticBioRepository {
        StaticBioRepository::new(self.bio.clone())
    }

    pub fn template_repository(&self) -> StaticTemplateRepository {
        [
            (TemplateName::Bio, &self.templates.bio),
            (TemplateName::BioLink, &self.templates.bio_link),
        ]
        .into_iter()
        .map(|(name, source)| (name, RichTextTemplate::new(source.as_str())))
        .collect()
    }
}

/// Reads `config/base.yaml`, the file for the current `APP_ENVIRONMENT` and
/// `SHOWCASE_*` environment overrides, relative to the working directory.
pub fn read_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(|err| ConfigError::Foreign(Box::new(err)))?;

    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    let environment = Environment::from_str(&environment)
        .map_err(|_| ConfigError::Message(format!("unknown APP_ENVIRONMENT `{environment}`")))?;

    read_config_from(&base_path.join("config"), environment)
}

pub fn read_config_from(
    config_directory: &Path,
    environment: Environment,
) -> Result<Settings, ConfigError> {
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(config_directory.join(environment_filename)))
        .add_source(
            config::Environment::with_prefix("SHOWCASE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
