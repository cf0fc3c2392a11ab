//! List command - show the user directory

use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::directory::{Directory, User};
use crate::error::RoloResult;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> RoloResult<()> {
    let mut coordinator = super::open_coordinator(config).await?;

    if coordinator.directory().needs_fetch() {
        let ctx = UiContext::detect();
        let mut spinner = ui::TaskSpinner::new(&ctx);
        spinner.start("Fetching users...");
        match coordinator.ensure_loaded().await {
            Ok(()) => spinner.stop("Directory loaded"),
            Err(e) => {
                spinner.stop_error("Fetch failed");
                return Err(e);
            }
        }
    }

    render(coordinator.directory(), args.format)
}

pub(crate) fn render(directory: &Directory, format: OutputFormat) -> RoloResult<()> {
    let users = directory.users();

    if users.is_empty() {
        match format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "Directory is empty");
            }
        }
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_table(directory, users),
        OutputFormat::Json => print_json(users)?,
        OutputFormat::Plain => print_plain(users),
    }

    Ok(())
}

fn print_table(directory: &Directory, users: &[User]) {
    println!(
        "{:<6} {:<24} {:<30} {:<16} {}",
        style("ID").bold(),
        style("NAME").bold(),
        style("EMAIL").bold(),
        style("PHONE").bold(),
        style("STATE").bold()
    );
    println!("{}", "-".repeat(84));

    for user in users {
        let state = if directory.is_pending(user.id) {
            style("pending").yellow()
        } else if User::is_seeded(user.id) {
            style("synced").green()
        } else {
            style("local").dim()
        };

        println!(
            "{:<6} {:<24} {:<30} {:<16} {}",
            user.id, user.name, user.email, user.phone, state
        );
    }

    println!();
    println!("{} user(s)", users.len());

    if let Some(error) = directory.last_error() {
        let ctx = UiContext::detect();
        ui::step_error(&ctx, error);
    }
}

fn print_json(users: &[User]) -> RoloResult<()> {
    let json = serde_json::to_string_pretty(users)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(users: &[User]) {
    for user in users {
        println!("{}", user.name);
    }
}
