use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};

pub use crate::cli_ops::*;

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightCyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::BrightMagenta.on_default())
}

#[derive(Debug, Parser)]
#[command(name = "leafy")]
#[command(bin_name = "leafy")]
#[command(version)]
#[command(about = "Track houseplants, their care schedule and care history")]
#[command(styles = cli_styles())]
pub struct Cli {
    #[arg(
        short = 'd',
        long,
        env = "LEAFY_DB_PATH",
        default_value = ".leafy/leafy.sqlite",
        help = "Path to the SQLite database."
    )]
    pub db: String,

    #[arg(
        short = 'D',
        long = "data-dir",
        env = "LEAFY_DATA_DIR",
        default_value = ".leafy",
        help = "Directory holding preferences and config."
    )]
    pub data_dir: PathBuf,

    #[arg(
        short = 'c',
        long,
        env = "LEAFY_CONFIG",
        help = "Config file (defaults to <data-dir>/config.toml)."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Log debug output to stderr."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.data_dir.join("config.toml"))
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Create a user account.")]
    Register(RegisterArgs),
    #[command(about = "Log in and remember the session.")]
    Login(LoginArgs),
    #[command(about = "Forget the current session.")]
    Logout,
    #[command(about = "Show the current session.")]
    Whoami(JsonArgs),
    #[command(about = "Add, list, show, edit or remove plants.")]
    Plant(PlantArgs),
    #[command(about = "Record watering or fertilizing for a plant.")]
    Care(CareArgs),
    #[command(about = "Show, reset or prune care history.")]
    History(HistoryArgs),
    #[command(about = "Add, list, show or remove plant logs.")]
    Log(LogArgs),
    #[command(about = "List plant logs that carry a photo.")]
    Gallery(LogListArgs),
    #[command(about = "List notifications and mark them read.")]
    Notifications(NotificationsArgs),
    #[command(about = "Post reminders for plants due for water.")]
    Remind(JsonArgs),
    #[command(about = "Handle inbound push messages.")]
    Push(PushArgs),
    #[command(about = "Summarise plants, care and notifications.")]
    Stats(JsonArgs),
    #[command(about = "Poll a live view and print it when it changes.")]
    Watch(WatchArgs),
    #[command(about = "Generate or install shell completions.")]
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct JsonArgs {
    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
#[command(about = "Generate or install shell completions.")]
pub struct CompletionsArgs {
    #[arg(help = "Shell name (bash, zsh, fish). Auto-detected if omitted.")]
    pub shell: Option<String>,

    #[arg(
        short = 'i',
        long = "install",
        help = "Write completions to the canonical path for the shell."
    )]
    pub install: bool,
}

#[derive(Debug, Args)]
#[command(about = "Create a user account.")]
pub struct RegisterArgs {
    #[arg(short = 'n', long, help = "Display name.")]
    pub name: String,

    #[arg(short = 'e', long, help = "Email address, used to log in.")]
    pub email: String,

    #[arg(short = 'p', long, env = "LEAFY_PASSWORD", help = "Password.")]
    pub password: String,

    #[arg(long, help = "Password confirmation (defaults to --password).")]
    pub confirm: Option<String>,
}

#[derive(Debug, Args)]
#[command(about = "Log in.")]
pub struct LoginArgs {
    #[arg(short = 'e', long, help = "Email address.")]
    pub email: String,

    #[arg(short = 'p', long, env = "LEAFY_PASSWORD", help = "Password.")]
    pub password: String,
}

#[derive(Debug, Args)]
#[command(about = "Record care for a plant.")]
pub struct CareArgs {
    #[arg(help = "Plant id.")]
    pub plant_id: i64,

    #[arg(
        short = 't',
        long = "type",
        default_value = "water",
        help = "Care type: water or fertilize."
    )]
    pub care_type: String,

    #[arg(
        short = 'a',
        long,
        help = "When the care happened (RFC 3339, defaults to now)."
    )]
    pub at: Option<String>,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
