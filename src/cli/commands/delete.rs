//! Delete command - remove a user optimistically

use crate::cli::args::DeleteArgs;
use crate::config::Config;
use crate::error::{RoloError, RoloResult};
use crate::ui::{self, UiContext};

/// Execute the delete command
pub async fn execute(args: DeleteArgs, config: &Config) -> RoloResult<()> {
    let mut coordinator = super::open_coordinator(config).await?;
    coordinator.ensure_loaded().await?;

    let user = coordinator
        .directory()
        .get(args.id)
        .cloned()
        .ok_or(RoloError::UserNotFound(args.id))?;

    let ctx = UiContext::detect().with_auto_yes(args.yes);
    let proceed = ui::confirm(
        &ctx,
        &format!("Delete {} (id {})?", user.name, user.id),
        false,
    )?;
    if !proceed {
        ui::step_info(&ctx, "Aborted");
        return Ok(());
    }

    coordinator.delete_user(args.id).await?;
    ui::step_ok(&ctx, &format!("Deleted {}", user.name));
    Ok(())
}
