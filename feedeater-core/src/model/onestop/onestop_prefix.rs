use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::OnestopIdError;

/// entity-type prefix of an Onestop ID.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum OnestopPrefix {
    Feed,
    Operator,
    Stop,
    Route,
}

impl OnestopPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnestopPrefix::Feed => "f",
            OnestopPrefix::Operator => "o",
            OnestopPrefix::Stop => "s",
            OnestopPrefix::Route => "r",
        }
    }
}

impl TryFrom<&str> for OnestopPrefix {
    type Error = OnestopIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "f" => Ok(OnestopPrefix::Feed),
            "o" => Ok(OnestopPrefix::Operator),
            "s" => Ok(OnestopPrefix::Stop),
            "r" => Ok(OnestopPrefix::Route),
            other => Err(OnestopIdError::UnknownPrefix(other.to_string())),
        }
    }
}

impl Display for OnestopPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
