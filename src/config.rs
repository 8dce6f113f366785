use std::{
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    err::Result,
    generator::{Constraints, Length},
};

// Settings

/// Startup constraints read from the settings file.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub length: u32,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl Settings {
    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match read_to_string(path) {
            Ok(json) => {
                debug!(path = %path.display(), "loading settings");
                Ok(serde_json::from_str(&json)?)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn constraints(&self) -> Result<Constraints> {
        Ok(Constraints {
            length: Length::new(self.length)?,
            include_digits: self.include_digits,
            include_symbols: self.include_symbols,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            length: Length::DEFAULT.get() as u32,
            include_digits: false,
            include_symbols: false,
        }
    }
}

// Functions

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("passgen").join("settings.json"))
}

// Tests
