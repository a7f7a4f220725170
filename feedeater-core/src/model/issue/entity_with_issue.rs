use serde::{Deserialize, Serialize};

/// an entity implicated in an issue, and the attribute found to be at fault.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct EntityWithIssue {
    pub onestop_id: String,
    pub entity_attribute: String,
}

impl EntityWithIssue {
    pub fn new(onestop_id: &str, entity_attribute: &str) -> EntityWithIssue {
        EntityWithIssue {
            onestop_id: onestop_id.to_string(),
            entity_attribute: entity_attribute.to_string(),
        }
    }
}
