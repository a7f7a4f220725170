use std::collections::HashMap;

use super::ChangesetError;
use crate::model::entity::{Entity, EntityKind, OnestopEntity, RouteStopPattern, Stop};

/// read and write access to the persistent entity graph.
///
/// implementations synchronize internally, so a store is shared by reference
/// between the graph builder and concurrent schedule workers.
pub trait EntityStore: Send + Sync {
    fn find_by_onestop_id(
        &self,
        kind: EntityKind,
        onestop_id: &str,
    ) -> Result<Option<Entity>, ChangesetError>;

    /// inserts the entity, replacing any stored entity with the same identity.
    fn create_or_update(&self, entity: Entity) -> Result<(), ChangesetError>;

    /// removes the entity. returns false when nothing was stored under its identity.
    fn destroy(&self, entity: &Entity) -> Result<bool, ChangesetError>;

    /// every stored entity of one kind.
    fn entities(&self, kind: EntityKind) -> Result<Vec<Entity>, ChangesetError>;

    /// platforms whose parent station is `parent_onestop_id`.
    fn platforms_of(&self, parent_onestop_id: &str) -> Result<Vec<Stop>, ChangesetError> {
        let platforms = self
            .entities(EntityKind::Stop)?
            .into_iter()
            .filter_map(Stop::from_entity)
            .filter(|s| s.parent_station_onestop_id.as_deref() == Some(parent_onestop_id))
            .collect();
        Ok(platforms)
    }

    fn patterns_serving_stop(
        &self,
        stop_onestop_id: &str,
    ) -> Result<Vec<RouteStopPattern>, ChangesetError> {
        let patterns = self
            .entities(EntityKind::RouteStopPattern)?
            .into_iter()
            .filter_map(RouteStopPattern::from_entity)
            .filter(|rsp| rsp.stop_pattern.iter().any(|s| s == stop_onestop_id))
            .collect();
        Ok(patterns)
    }

    /// entities of one kind identified by the given feed. schedule stop pairs
    /// carry no feed identifier and are matched through the trip identifiers
    /// of their pattern.
    fn entities_imported_from_feed(
        &self,
        feed_onestop_id: &str,
        kind: EntityKind,
    ) -> Result<Vec<Entity>, ChangesetError> {
        let prefix = format!("gtfs://{feed_onestop_id}/");
        if kind != EntityKind::ScheduleStopPair {
            let entities = self
                .entities(kind)?
                .into_iter()
                .filter(|e| e.imported_from_feeds().contains(feed_onestop_id))
                .collect();
            return Ok(entities);
        }
        let patterns = self
            .entities(EntityKind::RouteStopPattern)?
            .into_iter()
            .filter_map(RouteStopPattern::from_entity)
            .map(|rsp| (rsp.onestop_id, rsp.identified_by))
            .collect::<HashMap<_, _>>();
        let pairs = self
            .entities(EntityKind::ScheduleStopPair)?
            .into_iter()
            .filter(|e| match e {
                Entity::ScheduleStopPair(ssp) => patterns
                    .get(&ssp.route_stop_pattern_onestop_id)
                    .is_some_and(|ids| ids.contains(&format!("{prefix}trip/{}", ssp.trip))),
                _ => false,
            })
            .collect();
        Ok(pairs)
    }
}

/// typed lookups over any [`EntityStore`].
pub trait EntityStoreExt: EntityStore {
    fn find<E: OnestopEntity>(&self, onestop_id: &str) -> Result<Option<E>, ChangesetError> {
        let found = self.find_by_onestop_id(E::KIND, onestop_id)?;
        Ok(found.and_then(E::from_entity))
    }
}

impl<S: EntityStore + ?Sized> EntityStoreExt for S {}
