use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// the kind of raw feed record that maps to a Onestop entity.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FeedEntityKind {
    Agency,
    Route,
    Stop,
    Trip,
}

impl FeedEntityKind {
    /// path segment of the feed identifiers recorded in `identifiedBy`.
    pub fn prefix(&self) -> &'static str {
        match self {
            FeedEntityKind::Agency => "o",
            FeedEntityKind::Route => "r",
            FeedEntityKind::Stop => "s",
            FeedEntityKind::Trip => "trip",
        }
    }

    /// `gtfs://<feed>/<prefix>/<gtfs id>`
    pub fn feed_identifier(&self, feed_onestop_id: &str, gtfs_id: &str) -> String {
        format!("gtfs://{feed_onestop_id}/{}/{gtfs_id}", self.prefix())
    }
}

impl Display for FeedEntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeedEntityKind::Agency => "agency",
            FeedEntityKind::Route => "route",
            FeedEntityKind::Stop => "stop",
            FeedEntityKind::Trip => "trip",
        };
        write!(f, "{name}")
    }
}
