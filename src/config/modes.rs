//! Persistence mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which file persistence adapter the host uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceMode {
    /// Write into the local download folder tree (default).
    #[default]
    Native,
    /// Hand the save to a browser host.
    Web,
}

impl fmt::Display for PersistenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceMode::Native => write!(f, "native"),
            PersistenceMode::Web => write!(f, "web"),
        }
    }
}

impl FromStr for PersistenceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(PersistenceMode::Native),
            "web" => Ok(PersistenceMode::Web),
            _ => Err(format!("Unknown persistence mode: {}", s)),
        }
    }
}
