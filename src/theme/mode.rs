//! The two-valued theme mode and its string form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::marker::{DARK_CLASS, LIGHT_CLASS};

/// Visual presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Stored value was neither `"dark"` nor `"light"`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized theme mode {0:?}")]
pub struct ParseThemeModeError(pub String);

impl ThemeMode {
    pub fn opposite(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Canonical stored form
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Marker class that must be present on the document root for this mode
    pub fn marker(self) -> &'static str {
        match self {
            ThemeMode::Dark => DARK_CLASS,
            ThemeMode::Light => LIGHT_CLASS,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl FromStr for ThemeMode {
    type Err = ParseThemeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(ParseThemeModeError(other.to_string())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
