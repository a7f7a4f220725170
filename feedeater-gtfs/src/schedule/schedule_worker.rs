use std::{collections::HashMap, sync::Arc};

use feedeater_core::{
    changeset::{
        ChangeAction, ChangeBatcher, ChangesetId, ChangesetJournal, EntityStore, EntityStoreExt,
    },
    model::entity::{Entity, Route, RouteStopPattern, ScheduleStopPair, Stop},
};
use itertools::Itertools;

use super::{
    interpolate_times, pattern_distances, trip_ssps, EdgeStop, ProcessedTrip, ScheduleError,
    TripEdges,
};
use crate::{
    feed::{FeedSource, FeedTrip},
    graph::{FeedEntityKind, GtfsIdMap},
};

/// the outcome of one schedule chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleChunk {
    pub changeset: ChangesetId,
    pub trips: usize,
    pub schedule_stop_pairs: usize,
}

/// generates the schedule stop pairs of a group of trips into its own
/// changeset. workers share nothing mutable: each one owns its id map and
/// reads patterns, routes and stops from the store.
pub struct ScheduleWorker<'a> {
    feed: &'a FeedSource,
    store: &'a dyn EntityStore,
    journal: &'a dyn ChangesetJournal,
    batcher: ChangeBatcher,
    id_map: GtfsIdMap,
    patterns: HashMap<String, Option<Arc<RouteStopPattern>>>,
    operators: HashMap<String, Option<String>>,
    timezones: HashMap<String, Option<String>>,
}

impl<'a> ScheduleWorker<'a> {
    pub fn new(
        feed: &'a FeedSource,
        store: &'a dyn EntityStore,
        journal: &'a dyn ChangesetJournal,
        batcher: ChangeBatcher,
        id_map: GtfsIdMap,
    ) -> ScheduleWorker<'a> {
        ScheduleWorker {
            feed,
            store,
            journal,
            batcher,
            id_map,
            patterns: HashMap::new(),
            operators: HashMap::new(),
            timezones: HashMap::new(),
        }
    }

    /// creates a changeset, submits the edges of `trip_ids` in batches, then
    /// applies it and discards its payloads.
    pub fn perform(
        &mut self,
        feed_onestop_id: &str,
        feed_version: Option<&str>,
        trip_ids: &[String],
    ) -> Result<ScheduleChunk, ScheduleError> {
        let notes = format!("Import schedule stop pairs for {} trips", trip_ids.len());
        let changeset = self
            .journal
            .create(Some(feed_onestop_id), feed_version, &notes)?;
        let mut pending: Vec<Entity> = vec![];
        let mut submitted = 0;
        for trip_id in trip_ids.iter() {
            let Some(trip) = self.feed.trips.get(trip_id) else {
                log::warn!("trip '{trip_id}' not found in feed, skipping");
                continue;
            };
            let ssps = self.trip_schedule(trip)?;
            pending.extend(ssps.into_iter().map(Entity::from));
            if pending.len() >= self.batcher.max_entities {
                submitted += self.batcher.submit(
                    self.journal,
                    changeset,
                    ChangeAction::CreateUpdate,
                    std::mem::take(&mut pending),
                )?;
            }
        }
        if !pending.is_empty() {
            submitted += self.batcher.submit(
                self.journal,
                changeset,
                ChangeAction::CreateUpdate,
                pending,
            )?;
        }
        self.journal.apply(changeset)?;
        self.journal.destroy_payloads(changeset)?;
        log::debug!("changeset {changeset}: {submitted} schedule stop pairs");
        Ok(ScheduleChunk {
            changeset,
            trips: trip_ids.len(),
            schedule_stop_pairs: submitted,
        })
    }

    /// edges of one trip. a trip whose pattern or stops were not imported
    /// yields no edges.
    pub fn trip_schedule(&mut self, trip: &FeedTrip) -> Result<Vec<ScheduleStopPair>, ScheduleError> {
        let (Some(pattern_id), Some(route_id)) = (
            self.id_map.get(FeedEntityKind::Trip, &trip.id).map(String::from),
            self.id_map
                .get(FeedEntityKind::Route, &trip.route_id)
                .map(String::from),
        ) else {
            log::debug!("trip '{}' has no route stop pattern, skipping", trip.id);
            return Ok(vec![]);
        };
        let Some(pattern) = self.pattern(&pattern_id)? else {
            log::warn!("route stop pattern {pattern_id} of trip '{}' not found", trip.id);
            return Ok(vec![]);
        };
        let processed = ProcessedTrip::new(trip)?;
        let stop_ids = processed
            .stop_times
            .iter()
            .map(|st| self.id_map.get(FeedEntityKind::Stop, &st.stop_id).map(String::from))
            .collect::<Option<Vec<String>>>();
        let Some(stop_ids) = stop_ids else {
            log::warn!("trip '{}' visits stops that were not imported, skipping", trip.id);
            return Ok(vec![]);
        };

        let stop_refs = stop_ids.iter().map(String::as_str).collect_vec();
        if pattern.stop_distances.len() != pattern.stop_pattern.len() {
            log::warn!(
                "route stop pattern {}: stop distances unavailable, edges of trip '{}' carry no distance",
                pattern.onestop_id,
                trip.id
            );
        }
        let distances = pattern_distances(&pattern, &stop_refs);
        let interpolation_distances = processed
            .stop_times
            .iter()
            .zip(distances.iter())
            .map(|(st, d)| d.or(st.shape_dist_traveled))
            .collect_vec();
        let timepoints = interpolate_times(&processed.stop_times, &interpolation_distances);
        let timezones = stop_ids
            .iter()
            .map(|id| self.timezone(id))
            .collect::<Result<Vec<_>, _>>()?;
        let operator = self.operator(&route_id)?;

        let stops = processed
            .stop_times
            .iter()
            .enumerate()
            .map(|(i, stop_time)| EdgeStop {
                stop_time,
                onestop_id: &stop_ids[i],
                timezone: timezones[i].as_deref(),
                dist_traveled: distances[i],
                timepoint: timepoints[i],
            })
            .collect_vec();
        let edges = TripEdges {
            trip,
            route_onestop_id: &route_id,
            route_stop_pattern_onestop_id: &pattern.onestop_id,
            operator_onestop_id: operator.as_deref(),
            service: self.feed.services.get(&trip.service_id),
        };
        Ok(trip_ssps(&edges, &stops))
    }

    fn pattern(&mut self, onestop_id: &str) -> Result<Option<Arc<RouteStopPattern>>, ScheduleError> {
        if let Some(cached) = self.patterns.get(onestop_id) {
            return Ok(cached.clone());
        }
        let found = self.store.find::<RouteStopPattern>(onestop_id)?.map(Arc::new);
        self.patterns.insert(onestop_id.to_string(), found.clone());
        Ok(found)
    }

    fn operator(&mut self, route_onestop_id: &str) -> Result<Option<String>, ScheduleError> {
        if let Some(cached) = self.operators.get(route_onestop_id) {
            return Ok(cached.clone());
        }
        let operator = self
            .store
            .find::<Route>(route_onestop_id)?
            .and_then(|r| r.operated_by);
        self.operators
            .insert(route_onestop_id.to_string(), operator.clone());
        Ok(operator)
    }

    fn timezone(&mut self, stop_onestop_id: &str) -> Result<Option<String>, ScheduleError> {
        if let Some(cached) = self.timezones.get(stop_onestop_id) {
            return Ok(cached.clone());
        }
        let timezone = self
            .store
            .find::<Stop>(stop_onestop_id)?
            .and_then(|s| s.timezone);
        self.timezones
            .insert(stop_onestop_id.to_string(), timezone.clone());
        Ok(timezone)
    }
}
