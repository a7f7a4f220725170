use feedeater_core::{
    changeset::{ChangesetError, EntityStore},
    model::entity::{Operator, Route, RouteStopPattern, Stop},
};

use super::{EntityCache, FeedEntityKind, GtfsIdMap};

/// state of one import run: the entities resolved so far and the Onestop ID
/// each feed record resolved to. created per import and passed by reference
/// through graph construction.
pub struct ImportContext<'a> {
    feed_onestop_id: String,
    store: &'a dyn EntityStore,
    pub operators: EntityCache<Operator>,
    pub stops: EntityCache<Stop>,
    pub routes: EntityCache<Route>,
    pub patterns: EntityCache<RouteStopPattern>,
    id_map: GtfsIdMap,
}

impl<'a> ImportContext<'a> {
    pub fn new(feed_onestop_id: &str, store: &'a dyn EntityStore) -> ImportContext<'a> {
        ImportContext {
            feed_onestop_id: feed_onestop_id.to_string(),
            store,
            operators: EntityCache::default(),
            stops: EntityCache::default(),
            routes: EntityCache::default(),
            patterns: EntityCache::default(),
            id_map: GtfsIdMap::default(),
        }
    }

    pub fn feed_onestop_id(&self) -> &str {
        &self.feed_onestop_id
    }

    pub fn resolve_operator(&mut self, candidate: Operator) -> Result<&mut Operator, ChangesetError> {
        self.operators.resolve(self.store, candidate)
    }

    pub fn resolve_stop(&mut self, candidate: Stop) -> Result<&mut Stop, ChangesetError> {
        self.stops.resolve(self.store, candidate)
    }

    pub fn resolve_route(&mut self, candidate: Route) -> Result<&mut Route, ChangesetError> {
        self.routes.resolve(self.store, candidate)
    }

    pub fn resolve_pattern(
        &mut self,
        candidate: RouteStopPattern,
    ) -> Result<&mut RouteStopPattern, ChangesetError> {
        self.patterns.resolve(self.store, candidate)
    }

    /// records that the feed record resolved to `onestop_id`. a feed record
    /// maps to exactly one entity, so a conflicting remap is logged and ignored.
    pub fn map_feed_entity(&mut self, kind: FeedEntityKind, gtfs_id: &str, onestop_id: &str) {
        match self.id_map.get(kind, gtfs_id) {
            Some(existing) if existing != onestop_id => {
                log::warn!(
                    "{kind} '{gtfs_id}' already resolved to {existing}, ignoring {onestop_id}"
                );
            }
            Some(_) => {}
            None => {
                self.id_map.insert(kind, gtfs_id, onestop_id);
            }
        }
    }

    pub fn resolve_by_feed_entity(&self, kind: FeedEntityKind, gtfs_id: &str) -> Option<&str> {
        self.id_map.get(kind, gtfs_id)
    }

    /// the `identifiedBy` value for a feed record of this import.
    pub fn feed_identifier(&self, kind: FeedEntityKind, gtfs_id: &str) -> String {
        kind.feed_identifier(&self.feed_onestop_id, gtfs_id)
    }

    pub fn id_map(&self) -> &GtfsIdMap {
        &self.id_map
    }

    pub fn into_id_map(self) -> GtfsIdMap {
        self.id_map
    }
}
