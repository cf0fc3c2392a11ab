//! Edit command - update a user's fields optimistically

use crate::cli::args::EditArgs;
use crate::config::Config;
use crate::directory::UserFields;
use crate::error::{RoloError, RoloResult};
use crate::ui::{self, UiContext};

/// Execute the edit command
pub async fn execute(args: EditArgs, config: &Config) -> RoloResult<()> {
    if args.name.is_none() && args.email.is_none() && args.phone.is_none() {
        return Err(RoloError::User(
            "Nothing to change. Pass at least one of --name, --email, --phone".to_string(),
        ));
    }

    let mut coordinator = super::open_coordinator(config).await?;
    coordinator.ensure_loaded().await?;

    let current = coordinator
        .directory()
        .get(args.id)
        .cloned()
        .ok_or(RoloError::UserNotFound(args.id))?;

    let fields = merge(current.into(), &args)?;

    let ctx = UiContext::detect();
    coordinator.update_user(args.id, fields).await?;
    ui::step_ok(&ctx, &format!("Updated user {}", args.id));
    Ok(())
}

/// Overlay the provided flags onto the current field values
fn merge(mut fields: UserFields, args: &EditArgs) -> RoloResult<UserFields> {
    if let Some(ref name) = args.name {
        fields.name = name.clone();
    }
    if let Some(ref email) = args.email {
        fields.email = email.clone();
    }
    if let Some(ref phone) = args.phone {
        fields.phone = phone.clone();
    }

    for (label, value) in [
        ("name", &fields.name),
        ("email", &fields.email),
        ("phone", &fields.phone),
    ] {
        if value.trim().is_empty() {
            return Err(RoloError::User(format!("{} must not be empty", label)));
        }
    }

    Ok(fields)
}
