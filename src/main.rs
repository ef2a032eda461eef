mod app;
mod auth;
mod cli;
mod cli_help;
mod cli_ops;
mod completions;
mod config;
mod db;
mod dispatch;
mod domain;
mod history;
mod live;
#[cfg(test)]
mod main_tests;
mod notify;
mod prefs;
mod ui;
mod views;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins; --verbose only lowers the fallback level.
    let fallback = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(fallback.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn run() -> Result<(), app::AppError> {
    use clap::Parser;
    use cli::Commands;
    use dispatch::print_json;

    let args: Vec<String> = std::env::args().collect();
    if cli_help::is_toplevel_help(&args) {
        cli_help::print_custom_help();
        return Ok(());
    }

    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Completions(args) = &cli.command {
        return completions::run_completions_command(args.shell.as_deref(), args.install);
    }

    let config = config::LeafyConfig::load_or_default(&cli.config_path())?;
    let app = app::App::open(&cli.db, &cli.data_dir, config)?;

    match cli.command {
        Commands::Register(args) => {
            let confirm = args.confirm.as_deref().unwrap_or(&args.password);
            let user = app.register(&args.name, &args.email, &args.password, confirm)?;
            println!("registered {} <{}>", user.name, user.email);
        }
        Commands::Login(args) => {
            let session = app.login(&args.email, &args.password)?;
            ui::print_session(&session);
        }
        Commands::Logout => {
            app.logout()?;
            println!("logged out");
        }
        Commands::Whoami(args) => {
            let session = app.session()?;
            if args.json {
                print_json(&session)?;
            } else {
                ui::print_session(&session);
            }
        }
        Commands::Plant(args) => dispatch::run_plant_command(&app, args)?,
        Commands::Care(args) => dispatch::run_care_command(&app, args)?,
        Commands::History(args) => dispatch::run_history_command(&app, args)?,
        Commands::Log(args) => dispatch::run_log_command(&app, args)?,
        Commands::Gallery(args) => {
            let logs = app.gallery(args.plant_id)?;
            if args.json {
                print_json(&logs)?;
            } else {
                ui::print_logs("Gallery", &logs, app.utc_offset());
            }
        }
        Commands::Notifications(args) => dispatch::run_notifications_command(&app, args)?,
        Commands::Remind(args) => {
            let posted = app.send_care_reminders(domain::timestamp::now_millis())?;
            if args.json {
                print_json(&posted)?;
            } else {
                println!("posted {} reminder(s)", posted.len());
            }
        }
        Commands::Push(args) => dispatch::run_push_command(&app, args)?,
        Commands::Stats(args) => {
            let stats = app.stats(domain::timestamp::now_millis())?;
            if args.json {
                print_json(&stats)?;
            } else {
                ui::print_stats(&stats);
            }
        }
        Commands::Watch(args) => dispatch::run_watch_command(&app, args)?,
        Commands::Completions(_) => unreachable!("completions return before app init"),
    }

    Ok(())
}
