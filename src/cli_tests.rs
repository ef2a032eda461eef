use clap::Parser;

use super::{
    Cli, Commands, HistorySubcommands, LogSubcommands, NotificationsSubcommands,
    PlantSubcommands, PushSubcommands, WatchSubcommands,
};

fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(args)
}

#[test]
fn global_paths_default_under_dot_leafy() {
    let cli = parse(&["leafy", "stats"]);
    assert_eq!(cli.db, ".leafy/leafy.sqlite");
    assert_eq!(cli.data_dir, std::path::PathBuf::from(".leafy"));
    assert_eq!(
        cli.config_path(),
        std::path::PathBuf::from(".leafy/config.toml")
    );
    assert!(!cli.verbose);
}

#[test]
fn explicit_config_overrides_data_dir_default() {
    let cli = parse(&[
        "leafy",
        "--data-dir",
        "/tmp/leafy",
        "--config",
        "/etc/leafy.toml",
        "stats",
        "--verbose",
    ]);
    assert_eq!(
        cli.config_path(),
        std::path::PathBuf::from("/etc/leafy.toml")
    );
    assert!(cli.verbose);
}

#[test]
fn plant_add_collects_schedule_fields() {
    let cli = parse(&[
        "leafy",
        "plant",
        "add",
        "Monstera",
        "--water",
        "1x seminggu",
        "--water-day",
        "Senin",
        "--location",
        "balcony",
    ]);
    match cli.command {
        Commands::Plant(args) => match args.command {
            PlantSubcommands::Add(add) => {
                assert_eq!(add.name, "Monstera");
                assert_eq!(add.fields.watering_frequency.as_deref(), Some("1x seminggu"));
                assert_eq!(add.fields.watering_day.as_deref(), Some("Senin"));
                assert_eq!(add.fields.location.as_deref(), Some("balcony"));
                assert!(add.fields.fertilizing_frequency.is_none());
                assert!(!add.json);
            }
            other => panic!("expected Add, got {:?}", other),
        },
        other => panic!("expected Plant, got {:?}", other),
    }
}

#[test]
fn plant_edit_accepts_empty_value_to_clear() {
    let cli = parse(&["leafy", "plant", "edit", "4", "--location", "", "-N", "Fern"]);
    match cli.command {
        Commands::Plant(args) => match args.command {
            PlantSubcommands::Edit(edit) => {
                assert_eq!(edit.id, 4);
                assert_eq!(edit.name.as_deref(), Some("Fern"));
                assert_eq!(edit.fields.location.as_deref(), Some(""));
            }
            other => panic!("expected Edit, got {:?}", other),
        },
        other => panic!("expected Plant, got {:?}", other),
    }
}

#[test]
fn care_defaults_to_water() {
    let cli = parse(&["leafy", "care", "7"]);
    match cli.command {
        Commands::Care(args) => {
            assert_eq!(args.plant_id, 7);
            assert_eq!(args.care_type, "water");
            assert!(args.at.is_none());
        }
        other => panic!("expected Care, got {:?}", other),
    }
}

#[test]
fn bare_history_shows_and_subcommands_parse() {
    let cli = parse(&["leafy", "history", "--plant", "3", "--json"]);
    match cli.command {
        Commands::History(args) => {
            assert!(args.command.is_none());
            assert_eq!(args.show.plant_id, Some(3));
            assert!(args.show.json);
        }
        other => panic!("expected History, got {:?}", other),
    }

    let cli = parse(&["leafy", "history", "reset", "3", "--yes"]);
    match cli.command {
        Commands::History(args) => match args.command {
            Some(HistorySubcommands::Reset(reset)) => {
                assert_eq!(reset.plant_id, 3);
                assert!(reset.yes);
            }
            other => panic!("expected Reset, got {:?}", other),
        },
        other => panic!("expected History, got {:?}", other),
    }

    let cli = parse(&["leafy", "history", "prune"]);
    match cli.command {
        Commands::History(args) => match args.command {
            Some(HistorySubcommands::Prune(prune)) => assert_eq!(prune.older_than_days, 90),
            other => panic!("expected Prune, got {:?}", other),
        },
        other => panic!("expected History, got {:?}", other),
    }
}

#[test]
fn log_add_accepts_negative_coordinates() {
    let cli = parse(&[
        "leafy", "log", "add", "2", "--note", "new leaf", "--lat", "-6.2", "--lon", "106.8",
    ]);
    match cli.command {
        Commands::Log(args) => match args.command {
            LogSubcommands::Add(add) => {
                assert_eq!(add.plant_id, 2);
                assert_eq!(add.note.as_deref(), Some("new leaf"));
                assert_eq!(add.latitude, Some(-6.2));
                assert_eq!(add.longitude, Some(106.8));
            }
            other => panic!("expected Add, got {:?}", other),
        },
        other => panic!("expected Log, got {:?}", other),
    }
}

#[test]
fn notifications_and_push_subcommands_parse() {
    let cli = parse(&["leafy", "notifications", "read-all"]);
    match cli.command {
        Commands::Notifications(args) => {
            assert!(matches!(args.command, NotificationsSubcommands::ReadAll));
        }
        other => panic!("expected Notifications, got {:?}", other),
    }

    let cli = parse(&["leafy", "push", "receive", "--file", "msg.json"]);
    match cli.command {
        Commands::Push(args) => match args.command {
            PushSubcommands::Receive(receive) => {
                assert_eq!(receive.file, Some(std::path::PathBuf::from("msg.json")));
            }
        },
        other => panic!("expected Push, got {:?}", other),
    }
}

#[test]
fn watch_history_takes_plant_and_poll_options() {
    let cli = parse(&[
        "leafy",
        "watch",
        "history",
        "--plant",
        "1",
        "--polls",
        "2",
        "--interval-ms",
        "10",
    ]);
    match cli.command {
        Commands::Watch(args) => match args.command {
            WatchSubcommands::History(history) => {
                assert_eq!(history.plant_id, Some(1));
                assert_eq!(history.options.polls, Some(2));
                assert_eq!(history.options.interval_ms, 10);
            }
            other => panic!("expected History, got {:?}", other),
        },
        other => panic!("expected Watch, got {:?}", other),
    }
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["leafy", "water-all"]).is_err());
    assert!(Cli::try_parse_from(["leafy", "plant", "add"]).is_err());
}
