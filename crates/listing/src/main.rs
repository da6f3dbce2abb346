//! Scripted wizard session: a minimal stand-in for a presentation layer.
//!
//! Usage: `itemforge-walkthrough <title> <price> [primary image paths...]`

use anyhow::Context;

use itemforge_core::MediaSlot;
use itemforge_events::Event;
use itemforge_listing::steps::step;
use itemforge_listing::{Money, RecordEdit, WizardConfig, WizardController};
use itemforge_media::RawFile;

const USAGE: &str = "usage: itemforge-walkthrough <title> <price> [primary image paths...]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    itemforge_observability::init();

    let mut args = std::env::args().skip(1);
    let title = args.next().context(USAGE)?;
    let price: Money = args
        .next()
        .context(USAGE)?
        .parse()
        .context("price must be a decimal amount such as 12.50")?;
    let images: Vec<RawFile> = args.map(RawFile::from_path).collect();

    let config = WizardConfig::from_env();
    let mut wizard = WizardController::new(config);
    let notifications = wizard.subscribe();

    wizard.apply_edit(RecordEdit::Title(title));
    wizard.request_advance().context("basic information step")?;

    let admitted = wizard
        .accept_media(MediaSlot::Primary, images)
        .context("primary images")?;
    let applied = wizard.settle_media().await;
    tracing::info!(admitted, applied, "media settled");
    wizard.request_advance().context("media step")?;

    wizard.apply_edit(RecordEdit::SalePrice(price));
    wizard.jump_to_step(step::DETAILS);

    let outcome = wizard.submit().await;

    for notification in notifications.drain() {
        tracing::info!(event = notification.event_type(), at = %notification.occurred_at(), "notification");
    }

    let receipt = outcome.context("submit")?;
    let record = wizard.record();
    let summary = serde_json::json!({
        "listing_id": receipt.listing_id,
        "published_at": receipt.published_at,
        "title": record.title(),
        "sale_price": record.pricing().sale_price.to_string(),
        "primary_images": record
            .media()
            .primary
            .iter()
            .map(|image| image.file_name())
            .collect::<Vec<_>>(),
        "status": record.status(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
