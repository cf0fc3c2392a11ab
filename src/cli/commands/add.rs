//! Add command - create a user optimistically

use crate::cli::args::AddArgs;
use crate::config::Config;
use crate::directory::UserFields;
use crate::error::{RoloError, RoloResult};
use crate::ui::{self, UiContext};

/// Execute the add command
pub async fn execute(args: AddArgs, config: &Config) -> RoloResult<()> {
    let fields = validated_fields(args)?;

    let mut coordinator = super::open_coordinator(config).await?;
    coordinator.ensure_loaded().await?;

    let ctx = UiContext::detect();
    let name = fields.name.clone();
    let id = coordinator.add_user(fields).await?;

    ui::step_ok_detail(&ctx, &format!("Added {}", name), &format!("id {}", id));
    Ok(())
}

/// Field validation lives at this boundary; the directory core accepts
/// whatever it is given
fn validated_fields(args: AddArgs) -> RoloResult<UserFields> {
    for (label, value) in [
        ("name", &args.name),
        ("email", &args.email),
        ("phone", &args.phone),
    ] {
        if value.trim().is_empty() {
            return Err(RoloError::User(format!("{} must not be empty", label)));
        }
    }

    Ok(UserFields {
        name: args.name,
        email: args.email,
        phone: args.phone,
    })
}
