use serde::Deserialize;
use url::Url;

use super::RichText;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bio {
    pub name: String,
    pub role: String,
    pub location: String,
    /// Biography paragraphs, in reading order.
    pub bios: Vec<String>,
    #[serde(default)]
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocialLink {
    pub title: String,
    pub url: Url,
}

impl SocialLink {
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self {
            title: title.into(),
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioOutput {
    pub bio: RichText,
    pub links: Vec<RenderedSocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSocialLink {
    pub title: RichText,
    pub url: Url,
}
