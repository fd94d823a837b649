use std::{collections::HashMap, sync::Arc};

use strum::AsRefStr;
use tracing::{debug, instrument, warn};

use crate::domain::{
    models::{Bio, BioOutput, RenderedSocialLink, RichTextTemplate, SocialLink, TemplateName},
    ports::{
        inbound::{BioAction, UseCase},
        outbound::{BioRepository, TemplateRepository},
    },
    Action, BioError,
};

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Placeholders understood by the `bio` template.
#[derive(AsRefStr)]
#[strum(serialize_all = "lowercase")]
enum BioTemplateKey {
    Name,
    Work,
    At,
    Biograph,
}

/// Placeholders understood by the `bio-link` template.
#[derive(AsRefStr)]
#[strum(serialize_all = "lowercase")]
enum BioLinkTemplateKey {
    Link,
}

/// Implementation of the BioUseCase inbound port.
///
/// The bio and both templates are fetched concurrently. When more than one of
/// them fails, the reported cause is picked by position (bio, bio template,
/// link template), never by which failure arrived first.
pub struct BioUseCaseImpl<B, T> {
    bio_repository: Arc<B>,
    template_repository: Arc<T>,
}

impl<B: BioRepository, T: TemplateRepository> BioUseCaseImpl<B, T> {
    pub fn new(bio_repository: Arc<B>, template_repository: Arc<T>) -> Self {
        Self {
            bio_repository,
            template_repository,
        }
    }
}

impl<B: BioRepository, T: TemplateRepository> UseCase for BioUseCaseImpl<B, T> {
    type Input = ();
    type Output = BioAction;

    fn execute(&self, _input: ()) -> BioAction {
        let bio_repository = Arc::clone(&self.bio_repository);
        let template_repository = Arc::clone(&self.template_repository);

        Action::new(move || {
            let bio_repository = Arc::clone(&bio_repository);
            let template_repository = Arc::clone(&template_repository);

            async move { load_bio(bio_repository.as_ref(), template_repository.as_ref()).await }
        })
    }
}

#[instrument(name = "BioUseCase::execute", skip_all)]
async fn load_bio<B: BioRepository, T: TemplateRepository>(
    bio_repository: &B,
    template_repository: &T,
) -> Result<BioOutput, BioError> {
    let (bio, bio_template, link_template) = tokio::join!(
        bio_repository.get_bio(),
        template_repository.get_template(TemplateName::Bio),
        template_repository.get_template(TemplateName::BioLink),
    );

    let (bio, bio_template, link_template) = match (bio, bio_template, link_template) {
        (Ok(bio), Ok(bio_template), Ok(link_template)) => (bio, bio_template, link_template),
        (Err(err), _, _) => {
            warn!(error = %err, "failed to fetch bio");
            return Err(BioError::Underlying(Some(err)));
        }
        (_, Err(err), _) => {
            warn!(error = %err, template = %TemplateName::Bio, "failed to fetch template");
            return Err(BioError::Underlying(Some(err)));
        }
        (_, _, Err(err)) => {
            warn!(error = %err, template = %TemplateName::BioLink, "failed to fetch template");
            return Err(BioError::Underlying(Some(err)));
        }
    };

    let output = render(&bio, &bio_template, &link_template);
    debug!(links = output.links.len(), "bio rendered");

    Ok(output)
}

fn render(
    bio: &Bio,
    bio_template: &RichTextTemplate,
    link_template: &RichTextTemplate,
) -> BioOutput {
    let links = bio
        .links
        .iter()
        .map(|link| RenderedSocialLink {
            title: link_template.evaluate(&link_values(link)),
            url: link.url.clone(),
        })
        .collect();

    BioOutput {
        bio: bio_template.evaluate(&bio_values(bio)),
        links,
    }
}

fn bio_values(bio: &Bio) -> HashMap<String, String> {
    [
        (BioTemplateKey::Name, bio.name.clone()),
        (BioTemplateKey::Work, bio.role.clone()),
        (BioTemplateKey::At, bio.location.clone()),
        (BioTemplateKey::Biograph, bio.bios.join(PARAGRAPH_SEPARATOR)),
    ]
    .into_iter()
    .map(|(key, value)| (key.as_ref().to_string(), value))
    .collect()
}

fn link_values(link: &SocialLink) -> HashMap<String, String> {
    HashMap::from([(
        BioLinkTemplateKey::Link.as_ref().to_string(),
        link.title.clone(),
    )])
}
