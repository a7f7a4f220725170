use serde::{Deserialize, Serialize};

use crate::model::entity::Entity;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChangeAction {
    CreateUpdate,
    Destroy,
}

/// one change: `{"action": "createUpdate", "stop": {...}}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Change {
    pub action: ChangeAction,
    #[serde(flatten)]
    pub entity: Entity,
}

/// a batch of changes submitted to a changeset as a unit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ChangePayload {
    pub changes: Vec<Change>,
}

impl ChangePayload {
    pub fn new(action: ChangeAction, entities: Vec<Entity>) -> ChangePayload {
        let changes = entities
            .into_iter()
            .map(|entity| Change { action, entity })
            .collect();
        ChangePayload { changes }
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
