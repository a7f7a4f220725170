use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// the closed set of entity types that flow through change payloads.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Operator,
    Stop,
    Route,
    RouteStopPattern,
    ScheduleStopPair,
}

impl EntityKind {
    /// key of this entity type within a change, as in `{"action": .., "<key>": {..}}`.
    pub fn payload_key(&self) -> &'static str {
        match self {
            EntityKind::Operator => "operator",
            EntityKind::Stop => "stop",
            EntityKind::Route => "route",
            EntityKind::RouteStopPattern => "routeStopPattern",
            EntityKind::ScheduleStopPair => "scheduleStopPair",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.payload_key())
    }
}
