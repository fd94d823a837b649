use std::sync::Arc;

use anyhow::Context;
use showcase_domain::{
    adapters::outbound::media::{FileImageService, ImageCrateFilterService},
    config::read_config,
    domain::{
        ports::inbound::UseCase,
        services::{AvatarUseCaseImpl, BioUseCaseImpl},
    },
    telemetry,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = read_config().context("failed to read configuration")?;
    telemetry::init(&settings.application.log_filter);

    let bio_use_case = BioUseCaseImpl::new(
        Arc::new(settings.content.bio_repository()),
        Arc::new(settings.content.template_repository()),
    );
    let avatar_use_case = AvatarUseCaseImpl::with_config(
        Arc::new(FileImageService),
        Arc::new(ImageCrateFilterService),
        settings.avatar.pixellate(),
    );

    let bio = bio_use_case.execute(()).execute().await?;
    println!("{}", bio.bio);
    for link in &bio.links {
        println!("  {} <{}>", link.title, link.url);
    }

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    let avatar_action = avatar_use_case.execute(settings.application.avatar_url.clone());
    match avatar_action.execute_until_cancelled(&token).await {
        Some(result) => {
            let avatar = result.context("failed to build avatar")?;
            info!(
                variants = avatar.pixelized.len(),
                avatar_bytes = avatar.avatar.bytes.len(),
                "avatar ready"
            );
        }
        None => warn!("avatar pipeline cancelled"),
    }

    Ok(())
}
