use std::path::PathBuf;

use clap::{Parser, Subcommand};

use meeting_insight::views::TimeRange;

#[derive(Parser, Debug)]
#[command(name = "meeting-insight")]
#[command(about = "Turn meeting transcripts into tracked action items", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Override the configured data directory.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log to the systemd user journal instead of stderr.
    #[arg(long, global = true)]
    pub journal: bool,

    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP extraction endpoint.
    Serve {
        #[arg(long)]
        listen: Option<String>,
    },

    /// Extract action items from a transcript and add them to the list.
    Extract {
        /// Transcript text; read from stdin when no source is given.
        text: Option<String>,

        #[arg(long, conflicts_with_all = ["text", "template"])]
        file: Option<PathBuf>,

        #[arg(long, conflicts_with = "text")]
        template: Option<String>,
    },

    /// Show every action item, newest first.
    List,

    /// Flip the completed flag of an item (id or unique id prefix).
    Toggle { id: String },

    /// Delete an item (id or unique id prefix).
    Delete { id: String },

    Dashboard {
        #[arg(long, default_value_t = TimeRange::Month)]
        range: TimeRange,

        /// Write the dashboard export to this file or directory.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    Analytics {
        #[arg(long, default_value_t = TimeRange::Month)]
        range: TimeRange,
    },

    History {
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, value_parser = ["all", "completed", "pending"], default_value = "all")]
        status: String,

        /// Session date, YYYY-MM-DD.
        #[arg(long)]
        session: Option<String>,

        /// Write the selected session's export to this file or directory.
        #[arg(long, requires = "session")]
        export: Option<PathBuf>,
    },

    /// List meeting templates, or print one.
    Templates { id: Option<String> },

    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Write a full backup of items and preferences.
    Export { path: PathBuf },

    /// Restore a backup, replacing the keys it contains.
    Import { path: PathBuf },

    /// Delete all stored items and preferences.
    Clear {
        #[arg(long)]
        yes: bool,
    },

    /// Manage the Gemini API key in the system keyring.
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    Show,
    /// Update one preference, e.g. `profile set theme dark`.
    Set { field: String, value: String },
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    Set { key: String },
    Clear,
}
