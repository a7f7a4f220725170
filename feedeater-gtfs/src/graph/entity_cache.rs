use std::collections::{btree_map::Entry, BTreeMap};

use feedeater_core::{
    changeset::{ChangesetError, EntityStore, EntityStoreExt},
    model::entity::OnestopEntity,
};

/// entities of one kind resolved during an import, keyed by Onestop ID.
///
/// resolution looks in the cache, then in the store, and only then accepts the
/// candidate as a new entity. whichever is found is cached, so resolving the
/// same Onestop ID again returns the same entity. the store is never written.
#[derive(Debug, Clone)]
pub struct EntityCache<T: OnestopEntity> {
    entities: BTreeMap<String, T>,
}

impl<T: OnestopEntity> Default for EntityCache<T> {
    fn default() -> Self {
        EntityCache {
            entities: BTreeMap::new(),
        }
    }
}

impl<T: OnestopEntity> EntityCache<T> {
    pub fn resolve(&mut self, store: &dyn EntityStore, candidate: T) -> Result<&mut T, ChangesetError> {
        match self.entities.entry(candidate.onestop_id().to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let found = store.find::<T>(entry.key())?;
                Ok(entry.insert(found.unwrap_or(candidate)))
            }
        }
    }

    pub fn get(&self, onestop_id: &str) -> Option<&T> {
        self.entities.get(onestop_id)
    }

    pub fn get_mut(&mut self, onestop_id: &str) -> Option<&mut T> {
        self.entities.get_mut(onestop_id)
    }

    pub fn contains(&self, onestop_id: &str) -> bool {
        self.entities.contains_key(onestop_id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::EntityCache;
    use feedeater_core::{
        changeset::InMemoryStore,
        model::entity::{Entity, Operator},
    };

    #[test]
    fn test_resolve_is_idempotent() {
        let store = InMemoryStore::default();
        let mut cache: EntityCache<Operator> = EntityCache::default();
        let first = cache
            .resolve(
                &store,
                Operator::new(String::from("o-9q9-caltrain"), String::from("Caltrain")),
            )
            .expect("should resolve") as *const Operator;
        let second = cache
            .resolve(
                &store,
                Operator::new(String::from("o-9q9-caltrain"), String::from("Other name")),
            )
            .expect("should resolve") as *const Operator;
        assert!(std::ptr::eq(first, second));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get("o-9q9-caltrain").map(|o| o.name.as_str()),
            Some("Caltrain")
        );
    }

    #[test]
    fn test_stored_entity_wins() {
        let mut stored = Operator::new(String::from("o-9q9-caltrain"), String::from("Caltrain"));
        stored.website = Some(String::from("https://www.caltrain.com"));
        let store =
            InMemoryStore::from_entities(vec![Entity::from(stored.clone())]).expect("valid store");
        let mut cache: EntityCache<Operator> = EntityCache::default();
        let resolved = cache
            .resolve(
                &store,
                Operator::new(String::from("o-9q9-caltrain"), String::from("CT")),
            )
            .expect("should resolve");
        assert_eq!(resolved, &stored);
    }
}
