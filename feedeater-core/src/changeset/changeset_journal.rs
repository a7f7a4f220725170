use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{ChangeAction, ChangePayload, ChangesetError, ChangesetId, EntityStore};
use crate::model::entity::{Entity, EntityKind};

/// a changeset and the payloads submitted to it so far.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangesetRecord {
    pub id: ChangesetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_from_feed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_version: Option<String>,
    pub notes: String,
    pub payloads: Vec<ChangePayload>,
    pub applied: bool,
}

/// outcome of applying a changeset: the Onestop IDs it created, updated or
/// destroyed, grouped by entity kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppliedChangeset {
    pub id: ChangesetId,
    pub imported_from_feed: Option<String>,
    pub touched: BTreeMap<EntityKind, BTreeSet<String>>,
    pub schedule_stop_pairs: usize,
}

impl AppliedChangeset {
    pub fn touched(&self, kind: EntityKind) -> impl Iterator<Item = &String> + '_ {
        self.touched.get(&kind).into_iter().flatten()
    }

    pub fn is_feed_import(&self) -> bool {
        self.imported_from_feed.is_some()
    }
}

/// the versioned journal that entity changes are recorded in before they
/// reach the store.
pub trait ChangesetJournal: Send + Sync {
    fn create(
        &self,
        imported_from_feed: Option<&str>,
        feed_version: Option<&str>,
        notes: &str,
    ) -> Result<ChangesetId, ChangesetError>;

    fn add_payload(
        &self,
        changeset: ChangesetId,
        payload: ChangePayload,
    ) -> Result<(), ChangesetError>;

    /// writes every payload of the changeset to the store, in submission order.
    fn apply(&self, changeset: ChangesetId) -> Result<AppliedChangeset, ChangesetError>;

    /// discards the payloads of a changeset once it has been applied.
    fn destroy_payloads(&self, changeset: ChangesetId) -> Result<(), ChangesetError>;
}

/// identity of an entity within the changes of one changeset.
fn change_key(entity: &Entity) -> (EntityKind, String) {
    match entity {
        Entity::ScheduleStopPair(ssp) => (entity.kind(), format!("{:?}", ssp.identity())),
        _ => (entity.kind(), entity.onestop_id().unwrap_or_default().to_string()),
    }
}

/// replays the changes of a changeset over the state of the store, without
/// writing, and fails on the first destroy that would find nothing.
fn check_destroys(store: &dyn EntityStore, record: &ChangesetRecord) -> Result<(), ChangesetError> {
    let mut present: HashMap<(EntityKind, String), bool> = HashMap::new();
    let mut stored_pairs: Option<HashSet<String>> = None;
    for change in record.payloads.iter().flat_map(|p| p.changes.iter()) {
        let key = change_key(&change.entity);
        if change.action == ChangeAction::CreateUpdate {
            present.insert(key, true);
            continue;
        }
        let exists = match (present.get(&key), &change.entity) {
            (Some(exists), _) => *exists,
            (None, Entity::ScheduleStopPair(_)) => {
                if stored_pairs.is_none() {
                    let pairs = store.entities(EntityKind::ScheduleStopPair)?;
                    stored_pairs = Some(pairs.iter().map(|e| change_key(e).1).collect());
                }
                stored_pairs.as_ref().is_some_and(|pairs| pairs.contains(&key.1))
            }
            (None, _) => store.find_by_onestop_id(key.0, &key.1)?.is_some(),
        };
        if !exists {
            let onestop_id = change.entity.onestop_id().unwrap_or_default();
            return Err(ChangesetError::EntityNotFound(key.0, onestop_id.to_string()));
        }
        present.insert(key, false);
    }
    Ok(())
}

/// applies the payloads of a changeset to a store and collects the entities
/// they touched. every destroy is checked before anything is written, so a
/// changeset that fails leaves the store as it was.
pub(crate) fn apply_changes(
    store: &dyn EntityStore,
    record: &ChangesetRecord,
) -> Result<AppliedChangeset, ChangesetError> {
    check_destroys(store, record)?;
    let mut applied = AppliedChangeset {
        id: record.id,
        imported_from_feed: record.imported_from_feed.clone(),
        ..Default::default()
    };
    for change in record.payloads.iter().flat_map(|p| p.changes.iter()) {
        let kind = change.entity.kind();
        match change.action {
            ChangeAction::CreateUpdate => store.create_or_update(change.entity.clone())?,
            ChangeAction::Destroy => {
                if !store.destroy(&change.entity)? {
                    let onestop_id = change.entity.onestop_id().unwrap_or_default();
                    return Err(ChangesetError::EntityNotFound(kind, onestop_id.to_string()));
                }
            }
        }
        match change.entity.onestop_id() {
            Some(onestop_id) => {
                applied
                    .touched
                    .entry(kind)
                    .or_default()
                    .insert(onestop_id.to_string());
            }
            None => applied.schedule_stop_pairs += 1,
        }
    }
    Ok(applied)
}
