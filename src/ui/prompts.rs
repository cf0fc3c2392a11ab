//! Interactive prompts with non-interactive fallbacks

use super::context::UiContext;
use crate::error::{RoloError, RoloResult};
use console::style;

/// Ask a yes/no question.
///
/// Auto-approves under `--yes`; falls back to the default answer when not
/// attached to a terminal.
pub fn confirm(ctx: &UiContext, message: &str, default: bool) -> RoloResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }

    if !ctx.is_interactive() {
        println!(
            "{} {} (assuming {})",
            style("?").cyan(),
            message,
            if default { "yes" } else { "no" }
        );
        return Ok(default);
    }

    cliclack::confirm(message)
        .initial_value(default)
        .interact()
        .map_err(|e| RoloError::io("reading confirmation", e))
}
