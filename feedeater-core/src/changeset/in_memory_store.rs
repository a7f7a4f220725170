use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    sync::{RwLock, RwLockReadGuard},
};

use itertools::Itertools;

use super::{ChangesetError, EntityStore};
use crate::model::entity::{Entity, EntityKind, ScheduleStopPair};

/// an [`EntityStore`] held in memory, optionally seeded from and saved to a
/// JSON snapshot (an array of entities).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entities: RwLock<BTreeMap<EntityKind, BTreeMap<String, Entity>>>,
    schedule_stop_pairs: RwLock<Vec<ScheduleStopPair>>,
}

impl InMemoryStore {
    pub fn from_entities(entities: Vec<Entity>) -> Result<InMemoryStore, ChangesetError> {
        let store = InMemoryStore::default();
        for entity in entities {
            store.create_or_update(entity)?;
        }
        Ok(store)
    }

    pub fn load_snapshot(path: &Path) -> Result<InMemoryStore, ChangesetError> {
        let file = File::open(path).map_err(|source| ChangesetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entities: Vec<Entity> = serde_json::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded {} entities from snapshot {}",
            entities.len(),
            path.to_string_lossy()
        );
        InMemoryStore::from_entities(entities)
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<(), ChangesetError> {
        let mut entities = vec![];
        for kind in [
            EntityKind::Operator,
            EntityKind::Stop,
            EntityKind::Route,
            EntityKind::RouteStopPattern,
            EntityKind::ScheduleStopPair,
        ] {
            entities.extend(self.entities(kind)?);
        }
        let file = File::create(path).map_err(|source| ChangesetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer(BufWriter::new(file), &entities)?;
        Ok(())
    }

    /// number of stored entities of one kind.
    pub fn count(&self, kind: EntityKind) -> Result<usize, ChangesetError> {
        if kind == EntityKind::ScheduleStopPair {
            return Ok(self.read_pairs()?.len());
        }
        Ok(self.read()?.get(&kind).map(|m| m.len()).unwrap_or_default())
    }

    #[allow(clippy::type_complexity)]
    fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, BTreeMap<EntityKind, BTreeMap<String, Entity>>>, ChangesetError>
    {
        self.entities
            .read()
            .map_err(|e| ChangesetError::StoreLock(e.to_string()))
    }

    fn read_pairs(
        &self,
    ) -> Result<RwLockReadGuard<'_, Vec<ScheduleStopPair>>, ChangesetError> {
        self.schedule_stop_pairs
            .read()
            .map_err(|e| ChangesetError::StoreLock(e.to_string()))
    }
}

impl EntityStore for InMemoryStore {
    fn find_by_onestop_id(
        &self,
        kind: EntityKind,
        onestop_id: &str,
    ) -> Result<Option<Entity>, ChangesetError> {
        let entities = self.read()?;
        Ok(entities.get(&kind).and_then(|m| m.get(onestop_id)).cloned())
    }

    fn create_or_update(&self, entity: Entity) -> Result<(), ChangesetError> {
        match entity {
            Entity::ScheduleStopPair(ssp) => {
                let mut pairs = self
                    .schedule_stop_pairs
                    .write()
                    .map_err(|e| ChangesetError::StoreLock(e.to_string()))?;
                match pairs.iter().position(|p| p.identity() == ssp.identity()) {
                    Some(index) => pairs[index] = ssp,
                    None => pairs.push(ssp),
                }
            }
            other => {
                let kind = other.kind();
                let onestop_id = other.onestop_id().unwrap_or_default().to_string();
                let mut entities = self
                    .entities
                    .write()
                    .map_err(|e| ChangesetError::StoreLock(e.to_string()))?;
                entities.entry(kind).or_default().insert(onestop_id, other);
            }
        }
        Ok(())
    }

    fn destroy(&self, entity: &Entity) -> Result<bool, ChangesetError> {
        match entity {
            Entity::ScheduleStopPair(ssp) => {
                let mut pairs = self
                    .schedule_stop_pairs
                    .write()
                    .map_err(|e| ChangesetError::StoreLock(e.to_string()))?;
                match pairs.iter().position(|p| p.identity() == ssp.identity()) {
                    Some(index) => {
                        pairs.remove(index);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            other => {
                let onestop_id = other.onestop_id().unwrap_or_default();
                let mut entities = self
                    .entities
                    .write()
                    .map_err(|e| ChangesetError::StoreLock(e.to_string()))?;
                let removed = entities
                    .get_mut(&other.kind())
                    .and_then(|m| m.remove(onestop_id));
                Ok(removed.is_some())
            }
        }
    }

    fn entities(&self, kind: EntityKind) -> Result<Vec<Entity>, ChangesetError> {
        if kind == EntityKind::ScheduleStopPair {
            let pairs = self.read_pairs()?;
            return Ok(pairs.iter().cloned().map(Entity::from).collect_vec());
        }
        let entities = self.read()?;
        Ok(entities
            .get(&kind)
            .map(|m| m.values().cloned().collect_vec())
            .unwrap_or_default())
    }
}
