use std::collections::HashMap;

use crate::{
    changeset::{ChangesetError, EntityStore, EntityStoreExt},
    model::entity::Stop,
};

/// memoized stop lookups against a store for the duration of one check.
pub(crate) struct StopLookup<'a> {
    store: &'a dyn EntityStore,
    stops: HashMap<String, Option<Stop>>,
}

impl<'a> StopLookup<'a> {
    pub fn new(store: &'a dyn EntityStore) -> StopLookup<'a> {
        StopLookup {
            store,
            stops: HashMap::new(),
        }
    }

    pub fn get(&mut self, onestop_id: &str) -> Result<Option<&Stop>, ChangesetError> {
        if !self.stops.contains_key(onestop_id) {
            let found: Option<Stop> = self.store.find(onestop_id)?;
            self.stops.insert(onestop_id.to_string(), found);
        }
        Ok(self.stops.get(onestop_id).and_then(|s| s.as_ref()))
    }
}
