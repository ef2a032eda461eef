//! Top-level help, grouped by what the commands act on.

use clap::CommandFactory;

use crate::cli::Cli;
use crate::ui::Palette;

const HELP_SECTIONS: &[(&str, &[&str])] = &[
    ("Plants", &["plant", "care", "history", "log", "gallery", "stats"]),
    ("Notifications", &["notifications", "remind", "push", "watch"]),
    ("Account", &["register", "login", "logout", "whoami"]),
    ("Shell", &["completions"]),
];

/// Global options that take a value, as `(short, long)`.
const VALUE_FLAGS: &[(&str, &str)] = &[("-d", "--db"), ("-D", "--data-dir"), ("-c", "--config")];

/// True when the arguments name no subcommand, only global options and
/// possibly `-h`/`--help`.
pub fn is_toplevel_help(args: &[String]) -> bool {
    let mut rest = args.iter().skip(1).map(String::as_str);
    while let Some(arg) = rest.next() {
        match arg {
            "-h" | "--help" | "-v" | "--verbose" => {}
            _ if VALUE_FLAGS.iter().any(|(s, l)| arg == *s || arg == *l) => {
                if rest.next().is_none() {
                    return false;
                }
            }
            _ if VALUE_FLAGS.iter().any(|(s, l)| {
                arg.starts_with(&format!("{l}=")) || (arg.len() > 2 && arg.starts_with(s))
            }) => {}
            _ => return false,
        }
    }
    true
}

pub fn print_custom_help() {
    print!("{}", render_help(&Palette::auto()));
}

fn render_help(palette: &Palette) -> String {
    let cmd = Cli::command();
    let width = cmd
        .get_subcommands()
        .map(|sub| sub.get_name().len())
        .max()
        .unwrap_or(0);
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();
    let version = cmd.get_version().unwrap_or("?");

    let mut out = format!(
        "{} {version}\n{about}\n\n{} leafy [OPTIONS] <COMMAND>\n",
        palette.heading("leafy"),
        palette.day("Usage:")
    );
    for (title, names) in HELP_SECTIONS {
        out.push_str(&format!("\n{}\n", palette.heading(title)));
        for name in *names {
            let Some(sub) = cmd.find_subcommand(name) else {
                continue;
            };
            let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
            out.push_str(&format!(
                "  {}  {about}\n",
                palette.ok(&format!("{name:<width$}"))
            ));
        }
    }

    out.push_str(&format!("\n{}\n", palette.heading("Options")));
    for arg in cmd.get_arguments().filter(|arg| !arg.is_hide_set()) {
        let flag = match (arg.get_short(), arg.get_long()) {
            (Some(short), Some(long)) => format!("-{short}, --{long}"),
            (None, Some(long)) => format!("    --{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, None) => continue,
        };
        let help = arg.get_help().map(|s| s.to_string()).unwrap_or_default();
        out.push_str(&format!("  {}  {help}\n", palette.ok(&format!("{flag:<16}"))));
    }
    out.push_str(&format!(
        "  {}  Print help\n",
        palette.ok(&format!("{:<16}", "-h, --help"))
    ));
    out.push_str(&format!(
        "\n{}\n",
        palette.dim("Run `leafy <COMMAND> --help` for the options of one command.")
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::{is_toplevel_help, render_help, HELP_SECTIONS};
    use crate::cli::Cli;
    use crate::ui::Palette;
    use clap::CommandFactory;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_and_help_flags_show_custom_help() {
        assert!(is_toplevel_help(&args(&["leafy"])));
        assert!(is_toplevel_help(&args(&["leafy", "--help"])));
        assert!(is_toplevel_help(&args(&["leafy", "-h", "--verbose"])));
        assert!(!is_toplevel_help(&args(&["leafy", "stats"])));
        assert!(!is_toplevel_help(&args(&["leafy", "plant", "--help"])));
        assert!(!is_toplevel_help(&args(&["leafy", "--version"])));
    }

    #[test]
    fn global_value_flags_are_skipped_in_every_form() {
        assert!(is_toplevel_help(&args(&["leafy", "--db", "garden.sqlite"])));
        assert!(is_toplevel_help(&args(&["leafy", "--db=garden.sqlite", "-h"])));
        assert!(is_toplevel_help(&args(&["leafy", "-D/tmp/leafy", "-c", "leafy.toml"])));
        assert!(!is_toplevel_help(&args(&["leafy", "--db", "garden.sqlite", "stats"])));
        assert!(!is_toplevel_help(&args(&["leafy", "--config"])));
    }

    #[test]
    fn sections_cover_every_subcommand_once() {
        let mut listed: Vec<&str> = HELP_SECTIONS
            .iter()
            .flat_map(|(_, names)| names.iter().copied())
            .collect();
        listed.sort_unstable();
        let mut known: Vec<String> = Cli::command()
            .get_subcommands()
            .map(|sub| sub.get_name().to_string())
            .filter(|name| name != "help")
            .collect();
        known.sort_unstable();
        assert_eq!(listed, known);
    }

    #[test]
    fn plain_help_lists_areas_commands_and_options() {
        let help = render_help(&Palette::plain());
        assert!(!help.contains('\x1b'));
        for heading in ["Plants", "Notifications", "Account", "Options"] {
            assert!(help.contains(&format!("\n{heading}\n")), "missing {heading}");
        }
        assert!(help.contains("  care "));
        assert!(help.contains("-d, --db"));
        assert!(help.contains("-v, --verbose"));
    }
}
