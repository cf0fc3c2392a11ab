//! UI module for consistent CLI output
//!
//! Uses `cliclack` for interactive output with automatic fallback to plain
//! lines in CI/non-interactive environments.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{
    intro, outro_error, outro_success, step_error, step_info, step_ok, step_ok_detail,
    step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::confirm;
