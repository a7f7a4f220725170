use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::ImportError;

/// how much of a feed an import writes. each level includes the ones below it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ImportLevel {
    /// operators only
    Operators,
    /// adds stops, routes and route stop patterns
    Network,
    /// adds schedule stop pairs
    Schedule,
}

impl TryFrom<u8> for ImportLevel {
    type Error = ImportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ImportLevel::Operators),
            1 => Ok(ImportLevel::Network),
            2 => Ok(ImportLevel::Schedule),
            other => Err(ImportError::InvalidImportLevel(other)),
        }
    }
}

impl From<ImportLevel> for u8 {
    fn from(value: ImportLevel) -> Self {
        match value {
            ImportLevel::Operators => 0,
            ImportLevel::Network => 1,
            ImportLevel::Schedule => 2,
        }
    }
}

impl Display for ImportLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}
