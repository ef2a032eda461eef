use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Args)]
#[command(
    about = "Plant commands.",
    long_about = "Add, list, show, edit, or remove plants."
)]
pub struct PlantArgs {
    #[command(subcommand)]
    pub command: PlantSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum PlantSubcommands {
    #[command(about = "Add a plant.")]
    Add(PlantAddArgs),
    #[command(about = "List plants, newest first.")]
    Ls(PlantListArgs),
    #[command(about = "Show one plant.")]
    Show(PlantShowArgs),
    #[command(about = "Edit plant fields. An empty value clears a field.")]
    Edit(PlantEditArgs),
    #[command(about = "Remove a plant and its logs.")]
    Rm(PlantRmArgs),
}

#[derive(Debug, Args)]
pub struct PlantAddArgs {
    #[arg(help = "Plant name.")]
    pub name: String,

    #[command(flatten)]
    pub fields: PlantFieldArgs,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PlantFieldArgs {
    #[arg(
        short = 'w',
        long = "water",
        help = "Watering frequency: '1x sehari', '2x sehari' or '1x seminggu'."
    )]
    pub watering_frequency: Option<String>,

    #[arg(long = "water-day", help = "Watering day (Senin..Minggu).")]
    pub watering_day: Option<String>,

    #[arg(short = 'f', long = "fertilize", help = "Fertilizing frequency.")]
    pub fertilizing_frequency: Option<String>,

    #[arg(long = "fertilize-day", help = "Fertilizing day (Senin..Minggu).")]
    pub fertilizing_day: Option<String>,

    #[arg(short = 'l', long, help = "Where the plant lives.")]
    pub location: Option<String>,

    #[arg(short = 'n', long, help = "Free-form notes.")]
    pub notes: Option<String>,

    #[arg(short = 'p', long = "photo", help = "Photo URI.")]
    pub photo_uri: Option<String>,
}

#[derive(Debug, Args)]
pub struct PlantListArgs {
    #[arg(
        long = "needs-care",
        help = "Only plants whose watering interval has elapsed."
    )]
    pub needs_care: bool,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PlantShowArgs {
    #[arg(help = "Plant id.")]
    pub id: i64,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PlantEditArgs {
    #[arg(help = "Plant id.")]
    pub id: i64,

    #[arg(short = 'N', long, help = "Set the name.")]
    pub name: Option<String>,

    #[command(flatten)]
    pub fields: PlantFieldArgs,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PlantRmArgs {
    #[arg(help = "Plant id.")]
    pub id: i64,
}

#[derive(Debug, Args)]
#[command(
    about = "Care history commands.",
    long_about = "Show care history grouped by day, reset one plant's history, \
                  or prune old entries. Without a subcommand, shows history.",
    args_conflicts_with_subcommands = true
)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistorySubcommands>,

    #[command(flatten)]
    pub show: HistoryShowArgs,
}

#[derive(Debug, Subcommand)]
pub enum HistorySubcommands {
    #[command(about = "Show care history grouped by day.")]
    Show(HistoryShowArgs),
    #[command(about = "Delete all care history of one plant.")]
    Reset(HistoryResetArgs),
    #[command(about = "Delete care history older than a number of days.")]
    Prune(HistoryPruneArgs),
}

#[derive(Debug, Args)]
pub struct HistoryShowArgs {
    #[arg(short = 'p', long = "plant", help = "Only this plant's history.")]
    pub plant_id: Option<i64>,

    #[arg(long, help = "List entries without day grouping.")]
    pub flat: bool,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HistoryResetArgs {
    #[arg(help = "Plant id.")]
    pub plant_id: i64,

    #[arg(short = 'y', long, help = "Skip the confirmation prompt.")]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct HistoryPruneArgs {
    #[arg(
        long = "older-than-days",
        default_value_t = 90,
        help = "Delete entries older than this many days."
    )]
    pub older_than_days: u32,
}

#[derive(Debug, Args)]
#[command(
    about = "Plant log commands.",
    long_about = "Add, list, show, or remove photo and note logs for plants."
)]
pub struct LogArgs {
    #[command(subcommand)]
    pub command: LogSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum LogSubcommands {
    #[command(about = "Add a log entry for a plant.")]
    Add(LogAddArgs),
    #[command(about = "List log entries, newest first.")]
    Ls(LogListArgs),
    #[command(about = "Show one log entry.")]
    Show(LogShowArgs),
    #[command(about = "Remove a log entry.")]
    Rm(LogRmArgs),
}

#[derive(Debug, Args)]
pub struct LogAddArgs {
    #[arg(help = "Plant id.")]
    pub plant_id: i64,

    #[arg(short = 'p', long = "photo", help = "Photo URI.")]
    pub photo_uri: Option<String>,

    #[arg(short = 'n', long, help = "Note text.")]
    pub note: Option<String>,

    #[arg(long = "lat", allow_negative_numbers = true, help = "Latitude.")]
    pub latitude: Option<f64>,

    #[arg(long = "lon", allow_negative_numbers = true, help = "Longitude.")]
    pub longitude: Option<f64>,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct LogListArgs {
    #[arg(short = 'p', long = "plant", help = "Only this plant's logs.")]
    pub plant_id: Option<i64>,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct LogShowArgs {
    #[arg(help = "Log id.")]
    pub id: i64,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct LogRmArgs {
    #[arg(help = "Log id.")]
    pub id: i64,
}

#[derive(Debug, Args)]
#[command(about = "Notification commands.")]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub command: NotificationsSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum NotificationsSubcommands {
    #[command(about = "List notifications, newest first.")]
    Ls(NotificationsListArgs),
    #[command(about = "Print the number of unread notifications.")]
    Unread(crate::cli::JsonArgs),
    #[command(about = "Mark every notification read.")]
    ReadAll,
}

#[derive(Debug, Args)]
pub struct NotificationsListArgs {
    #[arg(short = 'u', long, help = "Only unread notifications.")]
    pub unread: bool,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
#[command(about = "Push message commands.")]
pub struct PushArgs {
    #[command(subcommand)]
    pub command: PushSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum PushSubcommands {
    #[command(about = "Turn a JSON push message into a local notification.")]
    Receive(PushReceiveArgs),
}

#[derive(Debug, Args)]
pub struct PushReceiveArgs {
    #[arg(
        short = 'f',
        long,
        help = "Read the message from this file instead of stdin."
    )]
    pub file: Option<PathBuf>,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
#[command(
    about = "Watch commands.",
    long_about = "Poll a live view and print it whenever the underlying data changes."
)]
pub struct WatchArgs {
    #[command(subcommand)]
    pub command: WatchSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum WatchSubcommands {
    #[command(about = "Watch the unread notification count.")]
    Unread(WatchOptions),
    #[command(about = "Watch the notification list.")]
    Notifications(WatchOptions),
    #[command(about = "Watch care history grouped by day.")]
    History(WatchHistoryArgs),
}

#[derive(Debug, Args)]
pub struct WatchOptions {
    #[arg(long, help = "Stop after this many polls (runs until killed if omitted).")]
    pub polls: Option<u32>,

    #[arg(
        long = "interval-ms",
        default_value_t = 1000,
        help = "Milliseconds between polls."
    )]
    pub interval_ms: u64,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct WatchHistoryArgs {
    #[arg(short = 'p', long = "plant", help = "Only this plant's history.")]
    pub plant_id: Option<i64>,

    #[command(flatten)]
    pub options: WatchOptions,
}
