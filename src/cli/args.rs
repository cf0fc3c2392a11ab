//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// rolo - Terminal user directory
///
/// Lists, searches, and edits user records backed by a remote record
/// service. Edits apply locally first and are rolled back if the server
/// rejects them.
#[derive(Parser, Debug)]
#[command(name = "rolo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ROLO_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List users in the directory
    List(ListArgs),

    /// Add a user
    Add(AddArgs),

    /// Edit a user's fields
    Edit(EditArgs),

    /// Delete a user
    Delete(DeleteArgs),

    /// Search users by name
    Search(SearchArgs),

    /// Reload the directory from the remote service
    Sync,

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Output format for list and search
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON array
    Json,
    /// One name per line
    Plain,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the add command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,
}

/// Arguments for the edit command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Id of the user to edit
    pub id: u64,

    /// New full name
    #[arg(long)]
    pub name: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,
}

/// Arguments for the delete command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Id of the user to delete
    pub id: u64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Case-insensitive name substring
    pub term: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config action (defaults to show)
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value (dot-separated key)
    Set { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_edit_with_partial_fields() {
        let cli = Cli::parse_from(["rolo", "edit", "3", "--name", "New Name"]);
        match cli.command {
            Commands::Edit(args) => {
                assert_eq!(args.id, 3);
                assert_eq!(args.name.as_deref(), Some("New Name"));
                assert!(args.email.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_search_format() {
        let cli = Cli::parse_from(["rolo", "search", "leanne", "--format", "json"]);
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.term, "leanne");
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
