use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::app::{App, AppError, PlantInput, PlantLogInput, PlantPatch};
use crate::cli::{
    CareArgs, HistoryArgs, HistoryShowArgs, HistorySubcommands, LogArgs, LogSubcommands,
    NotificationsArgs, NotificationsSubcommands, PlantArgs, PlantFieldArgs, PlantSubcommands,
    PushArgs, PushSubcommands, WatchArgs, WatchOptions, WatchSubcommands,
};
use crate::domain::care_type::CareType;
use crate::domain::timestamp::{now_millis, parse_rfc3339_millis};
use crate::domain::watering::needs_care;
use crate::live::LiveQuery;
use crate::ui;
use crate::views::{CareHistoryState, HomeState, NotificationState};

pub fn print_json(value: &impl Serialize) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn parse_at(raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw {
        None => Ok(None),
        Some(raw) => parse_rfc3339_millis(raw).map(Some).ok_or_else(|| {
            AppError::InvalidArgument(format!(
                "'{raw}' is not an RFC 3339 timestamp (e.g. 2025-03-05T08:00:00+07:00)"
            ))
        }),
    }
}

/// Reads one line and accepts `y` or `yes`, case-insensitively.
pub fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub fn read_push_input(file: Option<&Path>) -> Result<String, AppError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

pub fn plant_input(name: String, fields: PlantFieldArgs) -> PlantInput {
    PlantInput {
        name,
        watering_frequency: fields.watering_frequency,
        watering_day: fields.watering_day,
        fertilizing_frequency: fields.fertilizing_frequency,
        fertilizing_day: fields.fertilizing_day,
        location: fields.location,
        notes: fields.notes,
        photo_uri: fields.photo_uri,
    }
}

pub fn plant_patch(name: Option<String>, fields: PlantFieldArgs) -> PlantPatch {
    PlantPatch {
        name,
        watering_frequency: fields.watering_frequency,
        watering_day: fields.watering_day,
        fertilizing_frequency: fields.fertilizing_frequency,
        fertilizing_day: fields.fertilizing_day,
        location: fields.location,
        notes: fields.notes,
        photo_uri: fields.photo_uri,
    }
}

pub fn run_plant_command(app: &App, args: PlantArgs) -> Result<(), AppError> {
    let now = now_millis();
    match args.command {
        PlantSubcommands::Add(add) => {
            let json = add.json;
            let plant = app.add_plant(plant_input(add.name, add.fields))?;
            if json {
                print_json(&plant)?;
            } else {
                println!("{}", ui::created_line("added plant", plant.id, &plant.name));
            }
        }
        PlantSubcommands::Ls(list) => {
            let home = HomeState::new(app.config().live_linger());
            let _subscriptions = home.subscribe();
            let mut plants = home.plants.read(app)?;
            if list.needs_care {
                plants.retain(|plant| needs_care(plant, now));
            }
            if list.json {
                print_json(&plants)?;
            } else {
                ui::print_plant_list(&plants, home.care_needed(app, now)?, now);
            }
        }
        PlantSubcommands::Show(show) => {
            let plant = app
                .show_plant(show.id)?
                .ok_or_else(|| AppError::NotFound(format!("plant {}", show.id)))?;
            if show.json {
                print_json(&plant)?;
            } else {
                ui::print_plant_show(&plant, now, app.utc_offset());
            }
        }
        PlantSubcommands::Edit(edit) => {
            let json = edit.json;
            let plant = app.edit_plant(edit.id, plant_patch(edit.name, edit.fields))?;
            if json {
                print_json(&plant)?;
            } else {
                println!("{}", ui::created_line("updated plant", plant.id, &plant.name));
            }
        }
        PlantSubcommands::Rm(rm) => {
            let plant = app.delete_plant(rm.id)?;
            println!("{}", ui::created_line("removed plant", plant.id, &plant.name));
        }
    }
    Ok(())
}

pub fn run_care_command(app: &App, args: CareArgs) -> Result<(), AppError> {
    let care_type = CareType::from_str(&args.care_type)?;
    let at = parse_at(args.at.as_deref())?;
    let entry = app.mark_cared(args.plant_id, care_type, at)?;
    if args.json {
        print_json(&entry)?;
    } else {
        println!(
            "{} {}",
            entry.plant_name.as_deref().unwrap_or("plant"),
            care_type.past_tense()
        );
    }
    Ok(())
}

pub fn run_history_command(app: &App, args: HistoryArgs) -> Result<(), AppError> {
    match args.command {
        None => show_history(app, &args.show),
        Some(HistorySubcommands::Show(show)) => show_history(app, &show),
        Some(HistorySubcommands::Reset(reset)) => {
            let label = match app.show_plant(reset.plant_id)? {
                Some(plant) => plant.name,
                None => format!("plant {}", reset.plant_id),
            };
            if !reset.yes {
                let prompt = format!("Delete all care history for {label}?");
                let accepted = confirm(&prompt, &mut io::stdin().lock(), &mut io::stderr())?;
                if !accepted {
                    println!("history kept");
                    return Ok(());
                }
            }
            let state = CareHistoryState::new(Some(reset.plant_id), app.config().live_linger());
            let removed = state.reset_history(app)?;
            println!("removed {removed} care entr(ies) for {label}");
            Ok(())
        }
        Some(HistorySubcommands::Prune(prune)) => {
            let removed = app.prune_history(prune.older_than_days, now_millis())?;
            println!(
                "pruned {removed} care entr(ies) older than {} day(s)",
                prune.older_than_days
            );
            Ok(())
        }
    }
}

fn show_history(app: &App, args: &HistoryShowArgs) -> Result<(), AppError> {
    let state = CareHistoryState::new(args.plant_id, app.config().live_linger());
    let _subscriptions = state.subscribe();
    if args.flat {
        let entries = state.entries.read(app)?;
        if args.json {
            return print_json(&entries);
        }
        ui::print_history_entries(&entries, app.utc_offset());
        return Ok(());
    }
    let groups = state.grouped.read(app)?;
    if args.json {
        return print_json(&groups);
    }
    ui::print_grouped_history(&groups, app.utc_offset());
    Ok(())
}

pub fn run_log_command(app: &App, args: LogArgs) -> Result<(), AppError> {
    let offset = app.utc_offset();
    match args.command {
        LogSubcommands::Add(add) => {
            let log = app.add_log(PlantLogInput {
                plant_id: add.plant_id,
                photo_uri: add.photo_uri,
                note: add.note,
                latitude: add.latitude,
                longitude: add.longitude,
                created_at: None,
            })?;
            if add.json {
                print_json(&log)?;
            } else {
                println!(
                    "{}",
                    ui::created_line("added log", log.id, &format!("for plant {}", log.plant_id))
                );
            }
        }
        LogSubcommands::Ls(list) => {
            let logs = app.list_logs(list.plant_id)?;
            if list.json {
                print_json(&logs)?;
            } else {
                ui::print_logs("Plant logs", &logs, offset);
            }
        }
        LogSubcommands::Show(show) => {
            let log = app
                .show_log(show.id)?
                .ok_or_else(|| AppError::NotFound(format!("log {}", show.id)))?;
            if show.json {
                print_json(&log)?;
            } else {
                ui::print_log_show(&log, offset);
            }
        }
        LogSubcommands::Rm(rm) => {
            let log = app.delete_log(rm.id)?;
            println!(
                "{}",
                ui::created_line("removed log", log.id, &format!("for plant {}", log.plant_id))
            );
        }
    }
    Ok(())
}

pub fn run_notifications_command(app: &App, args: NotificationsArgs) -> Result<(), AppError> {
    match args.command {
        NotificationsSubcommands::Ls(list) => {
            let items = app.list_notifications(list.unread)?;
            if list.json {
                print_json(&items)?;
            } else {
                ui::print_notifications(&items, app.utc_offset());
            }
        }
        NotificationsSubcommands::Unread(unread) => {
            let home = HomeState::new(app.config().live_linger());
            let _subscriptions = home.subscribe();
            let count = home.unread_count.read(app)?;
            if unread.json {
                print_json(&serde_json::json!({ "unread": count }))?;
            } else {
                println!("{count}");
            }
        }
        NotificationsSubcommands::ReadAll => {
            let state = NotificationState::new(app.config().live_linger());
            let _subscriptions = state.subscribe();
            let updated = state.mark_all_read(app)?;
            let remaining = state.unread_count.read(app)?;
            println!("marked {updated} notification(s) read, {remaining} unread");
        }
    }
    Ok(())
}

pub fn run_push_command(app: &App, args: PushArgs) -> Result<(), AppError> {
    match args.command {
        PushSubcommands::Receive(receive) => {
            let raw = read_push_input(receive.file.as_deref())?;
            let posted = app.receive_push(&raw)?;
            if receive.json {
                print_json(&posted)?;
            } else {
                match posted {
                    Some(item) => println!("posted notification {}: {}", item.id, item.title),
                    None => println!("no notification payload; nothing posted"),
                }
            }
        }
    }
    Ok(())
}

pub fn run_watch_command(app: &App, args: WatchArgs) -> Result<(), AppError> {
    let linger = app.config().live_linger();
    let offset = app.utc_offset();
    match args.command {
        WatchSubcommands::Unread(options) => {
            let home = HomeState::new(linger);
            watch(app, &home.unread_count, &options, |count| {
                println!("unread: {count}")
            })
        }
        WatchSubcommands::Notifications(options) => {
            let state = NotificationState::new(linger);
            watch(app, &state.notifications, &options, |items| {
                ui::print_notifications(items, offset)
            })
        }
        WatchSubcommands::History(history) => {
            let state = CareHistoryState::new(history.plant_id, linger);
            watch(app, &state.grouped, &history.options, |groups| {
                ui::print_grouped_history(groups, offset)
            })
        }
    }
}

/// Polls `query` and prints its value whenever it differs from the last one printed.
fn watch<T, P>(
    app: &App,
    query: &LiveQuery<App, T>,
    options: &WatchOptions,
    print: P,
) -> Result<(), AppError>
where
    T: Clone + PartialEq + Serialize,
    P: Fn(&T),
{
    let _subscription = query.subscribe();
    let interval = Duration::from_millis(options.interval_ms);
    let mut last: Option<T> = None;
    let mut polls = 0u32;
    loop {
        let value = query.read(app)?;
        if last.as_ref() != Some(&value) {
            if options.json {
                println!("{}", serde_json::to_string(&value)?);
            } else {
                print(&value);
            }
            last = Some(value);
        }
        polls = polls.saturating_add(1);
        if options.polls.is_some_and(|limit| polls >= limit) {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}
