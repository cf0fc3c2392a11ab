//! Search command - filter users by name

use crate::cli::args::{OutputFormat, SearchArgs};
use crate::config::Config;
use crate::directory::User;
use crate::error::RoloResult;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the search command.
///
/// A pure read over the cached directory; loads on first use but never
/// mutates records or pending state.
pub async fn execute(args: SearchArgs, config: &Config) -> RoloResult<()> {
    let mut coordinator = super::open_coordinator(config).await?;
    coordinator.ensure_loaded().await?;

    let directory = coordinator.directory();
    let hits: Vec<&User> = directory.search(&args.term);

    if hits.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, &format!("No users matching \"{}\"", args.term));
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => {
            for user in &hits {
                let pending = if directory.is_pending(user.id) {
                    style(" (pending)").yellow().to_string()
                } else {
                    String::new()
                };
                println!(
                    "{:<6} {:<24} {}{}",
                    user.id,
                    user.name,
                    user.email,
                    pending
                );
            }
            println!();
            println!("{} match(es)", hits.len());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&hits)?;
            println!("{}", json);
        }
        OutputFormat::Plain => {
            for user in &hits {
                println!("{}", user.name);
            }
        }
    }

    Ok(())
}
