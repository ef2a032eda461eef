use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub is_logged_in: bool,
}

/// Key-value preferences persisted as one TOML file.
///
/// Reads are snapshots; every edit rewrites the whole file through a temp file
/// and a rename, so readers never see a half-written document.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Result<Preferences, PrefsError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(toml::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn edit<F>(&self, apply: F) -> Result<Preferences, PrefsError>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut prefs = self.snapshot()?;
        apply(&mut prefs);
        self.write(&prefs)?;
        Ok(prefs)
    }

    pub fn clear(&self) -> Result<(), PrefsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string(prefs)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, rendered)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum PrefsError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefsError::Io(err) => write!(f, "preferences I/O error: {}", err),
            PrefsError::Parse(err) => write!(f, "preferences file is corrupt: {}", err),
            PrefsError::Serialize(err) => write!(f, "failed to encode preferences: {}", err),
        }
    }
}

impl Error for PrefsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PrefsError::Io(err) => Some(err),
            PrefsError::Parse(err) => Some(err),
            PrefsError::Serialize(err) => Some(err),
        }
    }
}

impl From<io::Error> for PrefsError {
    fn from(value: io::Error) -> Self {
        PrefsError::Io(value)
    }
}

impl From<toml::de::Error> for PrefsError {
    fn from(value: toml::de::Error) -> Self {
        PrefsError::Parse(value)
    }
}

impl From<toml::ser::Error> for PrefsError {
    fn from(value: toml::ser::Error) -> Self {
        PrefsError::Serialize(value)
    }
}
