//! Sync command - explicit reload from the remote service

use crate::config::Config;
use crate::error::RoloResult;
use crate::ui::{self, UiContext};

/// Execute the sync command.
///
/// The only retry path after a failed fetch; nothing retries
/// automatically.
pub async fn execute(config: &Config) -> RoloResult<()> {
    let mut coordinator = super::open_coordinator(config).await?;

    let ctx = UiContext::detect();
    ui::intro(&ctx, "rolo sync");

    let mut spinner = ui::TaskSpinner::new(&ctx);
    spinner.start("Fetching users from the record service...");

    match coordinator.refresh().await {
        Ok(()) => {
            spinner.stop("Fetch complete");
            ui::outro_success(
                &ctx,
                &format!("Synced {} user(s)", coordinator.directory().users().len()),
            );
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Fetch failed");
            ui::outro_error(&ctx, "Sync failed");
            Err(e)
        }
    }
}
