use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::app::AppError;
use crate::cli::Cli;

const BIN_NAME: &str = "leafy";

pub fn generate_completions(shell: Shell, buf: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, buf);
}

pub fn detect_current_shell() -> Option<Shell> {
    let shell_var = std::env::var("SHELL").ok()?;
    shell_from_path(&shell_var)
}

fn shell_from_path(raw: &str) -> Option<Shell> {
    let basename = raw.rsplit('/').next()?;
    parse_shell(basename)
}

fn completions_install_path_for_home(shell: Shell, home: &Path) -> Option<PathBuf> {
    match shell {
        Shell::Bash => Some(home.join(".local/share/bash-completion/completions/leafy")),
        Shell::Zsh => Some(home.join(".config/leafy/completions/leafy.zsh")),
        Shell::Fish => Some(home.join(".config/fish/completions/leafy.fish")),
        _ => None,
    }
}

pub fn install_completions(shell: Shell) -> io::Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    install_completions_in(shell, Path::new(&home))
}

fn install_completions_in(shell: Shell, home: &Path) -> io::Result<PathBuf> {
    let path = completions_install_path_for_home(shell, home).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!("no install path for {shell:?}"),
        )
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut buf = Vec::new();
    generate_completions(shell, &mut buf);
    std::fs::write(&path, buf)?;

    if shell == Shell::Zsh {
        patch_zshrc(home, &path)?;
    }

    Ok(path)
}

fn patch_zshrc(home: &Path, completions_path: &Path) -> io::Result<()> {
    let zshrc = home.join(".zshrc");
    let source_line = format!("source \"{}\"", completions_path.display());

    if zshrc.exists() {
        let content = std::fs::read_to_string(&zshrc)?;
        if content.contains(&source_line) {
            return Ok(());
        }
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&zshrc)?;
    writeln!(file)?;
    writeln!(file, "# leafy shell completions")?;
    writeln!(file, "{source_line}")?;
    Ok(())
}

fn parse_shell(raw: &str) -> Option<Shell> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "elvish" => Some(Shell::Elvish),
        "powershell" | "pwsh" => Some(Shell::PowerShell),
        _ => None,
    }
}

pub fn run_completions_command(shell_arg: Option<&str>, install: bool) -> Result<(), AppError> {
    let shell = match shell_arg {
        Some(name) => parse_shell(name)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown shell '{name}'")))?,
        None => detect_current_shell().ok_or_else(|| {
            AppError::InvalidArgument(
                "unable to detect shell from $SHELL; pass a shell name".to_string(),
            )
        })?,
    };

    if install {
        let path = install_completions(shell)?;
        println!("completions installed to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        generate_completions(shell, &mut stdout);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_is_read_from_path_basename() {
        assert_eq!(shell_from_path("/bin/zsh"), Some(Shell::Zsh));
        assert_eq!(shell_from_path("/usr/bin/bash"), Some(Shell::Bash));
        assert_eq!(shell_from_path("/usr/local/bin/fish"), Some(Shell::Fish));
        assert_eq!(shell_from_path("/usr/bin/pwsh"), Some(Shell::PowerShell));
        assert_eq!(shell_from_path("/usr/bin/csh"), None);
    }

    #[test]
    fn parse_shell_is_case_insensitive() {
        assert_eq!(parse_shell("BASH"), Some(Shell::Bash));
        assert_eq!(parse_shell("Zsh"), Some(Shell::Zsh));
        assert_eq!(parse_shell("elvish"), Some(Shell::Elvish));
        assert_eq!(parse_shell("nonsense"), None);
    }

    #[test]
    fn install_paths_exist_only_for_bash_zsh_fish() {
        let home = PathBuf::from("/tmp/test-home");
        let bash = completions_install_path_for_home(Shell::Bash, &home).expect("bash path");
        assert!(bash.ends_with("bash-completion/completions/leafy"));
        let zsh = completions_install_path_for_home(Shell::Zsh, &home).expect("zsh path");
        assert!(zsh.ends_with("leafy.zsh"));
        let fish = completions_install_path_for_home(Shell::Fish, &home).expect("fish path");
        assert!(fish.ends_with("leafy.fish"));
        assert!(completions_install_path_for_home(Shell::Elvish, &home).is_none());
    }

    #[test]
    fn bash_completions_mention_subcommands() {
        let mut buf = Vec::new();
        generate_completions(Shell::Bash, &mut buf);
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("leafy"));
        assert!(text.contains("notifications"));
    }

    #[test]
    fn zsh_install_patches_zshrc_once() {
        let home = std::env::temp_dir().join(format!("leafy-comp-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&home).expect("dir should be creatable");

        let path = install_completions_in(Shell::Zsh, &home).expect("zsh install should succeed");
        assert!(path.exists());
        let zshrc = home.join(".zshrc");
        let first = std::fs::read_to_string(&zshrc).expect("should read .zshrc");
        assert!(first.contains("leafy.zsh"));

        install_completions_in(Shell::Zsh, &home).expect("second install should succeed");
        let second = std::fs::read_to_string(&zshrc).expect("should read .zshrc again");
        assert_eq!(first.matches("source").count(), second.matches("source").count());

        assert!(install_completions_in(Shell::Elvish, &home).is_err());
        let _ = std::fs::remove_dir_all(home);
    }

    #[test]
    fn unknown_shell_name_is_invalid_argument() {
        let result = run_completions_command(Some("nonsense"), false);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }
}
