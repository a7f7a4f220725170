use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};

use feedeater_core::{
    geometry::{calculate_distances, geometry_ops, route_geometry},
    model::{
        entity::{Operator, Route, RouteStopPattern, Stop, VehicleType},
        onestop::{route_stop_pattern_onestop_id, OnestopId, OnestopPrefix},
    },
};
use feedeater_core::changeset::EntityStore;
use geo::{LineString, Point};
use itertools::Itertools;

use super::{CandidateGraph, FeedBoundingBox, FeedEntityKind, ImportContext};
use crate::{
    config::OperatorInFeed,
    feed::{FeedSource, FeedStop},
    import::ImportError,
    schedule::{to_tfn, ProcessedTrip},
};

/// platforms of platforms (egresses) are nested at most this deep.
const MAX_STATION_DEPTH: usize = 8;

/// resolves the records of a feed into Onestop entities.
///
/// stops are resolved first (parent stations before their platforms), then
/// routes from the stops their trips visit, then one route stop pattern per
/// distinct stop sequence, and finally the operators declared for the feed.
pub struct GtfsGraph<'a> {
    feed: &'a FeedSource,
    context: ImportContext<'a>,
}

impl<'a> GtfsGraph<'a> {
    pub fn new(
        feed: &'a FeedSource,
        feed_onestop_id: &str,
        store: &'a dyn EntityStore,
    ) -> GtfsGraph<'a> {
        GtfsGraph {
            feed,
            context: ImportContext::new(feed_onestop_id, store),
        }
    }

    pub fn context(&self) -> &ImportContext<'a> {
        &self.context
    }

    /// builds the graph of entities reachable from the declared operators.
    ///
    /// # Errors
    ///
    /// [`ImportError::NoOperatorsFound`] when none of `operators_in_feed`
    /// matches an agency of the feed.
    pub fn build(
        mut self,
        operators_in_feed: &[OperatorInFeed],
        simplify_tolerance: f64,
    ) -> Result<CandidateGraph, ImportError> {
        self.load_stops()?;
        self.load_routes()?;
        self.load_route_stop_patterns()?;
        let operators = self.load_operators(operators_in_feed)?;
        if operators.is_empty() {
            return Err(ImportError::NoOperatorsFound);
        }
        Ok(self.candidate_graph(&operators, simplify_tolerance))
    }

    pub fn load_stops(&mut self) -> Result<(), ImportError> {
        log::info!("  stops");
        let feed = self.feed;
        let (parents, children): (Vec<&FeedStop>, Vec<&FeedStop>) = feed
            .stops
            .values()
            .partition(|s| s.parent_station.is_none());

        for stop in parents {
            let Some(location) = stop.location else {
                log::warn!("stop '{}' has no location, skipping", stop.id);
                continue;
            };
            let onestop_id = match OnestopId::from_points(
                OnestopPrefix::Stop,
                &[location],
                stop.name.as_deref(),
            ) {
                Ok(id) => id.to_string(),
                Err(e) => {
                    log::warn!("stop '{}': {e}, skipping", stop.id);
                    continue;
                }
            };
            let name = stop.name.clone().unwrap_or_default();
            self.add_stop(stop, onestop_id, name, location, None)?;
        }

        for stop in children
            .into_iter()
            .sorted_by_cached_key(|s| (self.station_depth(s), s.id.clone()))
        {
            let Some(location) = feed.stop_location(&stop.id) else {
                log::warn!("stop '{}' has no location, skipping", stop.id);
                continue;
            };
            let parent = stop
                .parent_station
                .as_deref()
                .and_then(|p| self.context.resolve_by_feed_entity(FeedEntityKind::Stop, p))
                .map(String::from);
            match parent {
                Some(parent_onestop_id) => {
                    let onestop_id = OnestopId::from_str(&parent_onestop_id)?
                        .with_platform(&stop.id)?
                        .to_string();
                    let name = stop
                        .name
                        .clone()
                        .or_else(|| {
                            self.context
                                .stops
                                .get(&parent_onestop_id)
                                .map(|p| p.name.clone())
                        })
                        .unwrap_or_default();
                    self.add_stop(stop, onestop_id, name, location, Some(&parent_onestop_id))?;
                }
                None => {
                    log::warn!(
                        "stop '{}': parent station {:?} not found, importing without parent",
                        stop.id,
                        stop.parent_station
                    );
                    let onestop_id = match OnestopId::from_points(
                        OnestopPrefix::Stop,
                        &[location],
                        stop.name.as_deref(),
                    ) {
                        Ok(id) => id.to_string(),
                        Err(e) => {
                            log::warn!("stop '{}': {e}, skipping", stop.id);
                            continue;
                        }
                    };
                    let name = stop.name.clone().unwrap_or_default();
                    self.add_stop(stop, onestop_id, name, location, None)?;
                }
            }
        }
        log::info!("  stops: {}", self.context.stops.len());
        Ok(())
    }

    pub fn load_routes(&mut self) -> Result<(), ImportError> {
        log::info!("  routes");
        let feed = self.feed;
        for route in feed.routes.values() {
            let mut serves: BTreeSet<String> = feed
                .route_trips(&route.id)
                .flat_map(|trip| trip.stop_times.iter())
                .filter_map(|st| {
                    self.context
                        .resolve_by_feed_entity(FeedEntityKind::Stop, &st.stop_id)
                })
                .map(String::from)
                .collect();
            let parents = serves
                .iter()
                .filter_map(|id| self.context.stops.get(id))
                .filter_map(|s| s.parent_station_onestop_id.clone())
                .collect_vec();
            serves.extend(parents);
            if serves.is_empty() {
                log::debug!("route '{}' serves no stops, skipping", route.id);
                continue;
            }
            let Some(name) = route.name() else {
                log::warn!("route '{}' has no name, skipping", route.id);
                continue;
            };
            let points = self.stop_points(serves.iter());
            let onestop_id =
                match OnestopId::from_points(OnestopPrefix::Route, &points, Some(name)) {
                    Ok(id) => id.to_string(),
                    Err(e) => {
                        log::warn!("route '{}': {e}, skipping", route.id);
                        continue;
                    }
                };

            let identifier = self.context.feed_identifier(FeedEntityKind::Route, &route.id);
            let color = route.color.as_deref().and_then(Route::color_from_gtfs);
            let mut candidate =
                Route::new(onestop_id, name.to_string(), VehicleType(route.route_type));
            candidate.color = color.clone();
            let resolved = self.context.resolve_route(candidate)?;
            if resolved.color.is_none() {
                resolved.color = color;
            }
            resolved.serves.extend(serves);
            resolved.identified_by.insert(identifier);
            let onestop_id = resolved.onestop_id.clone();
            self.context
                .map_feed_entity(FeedEntityKind::Route, &route.id, &onestop_id);
        }
        log::info!("  routes: {}", self.context.routes.len());
        Ok(())
    }

    pub fn load_route_stop_patterns(&mut self) -> Result<(), ImportError> {
        log::info!("  route stop patterns");
        let feed = self.feed;
        for trip in feed.trips.values() {
            let Some(route_onestop_id) = self
                .context
                .resolve_by_feed_entity(FeedEntityKind::Route, &trip.route_id)
                .map(String::from)
            else {
                continue;
            };
            let processed = ProcessedTrip::new(trip)?;
            let stop_pattern = processed
                .stop_times
                .iter()
                .map(|st| {
                    self.context
                        .resolve_by_feed_entity(FeedEntityKind::Stop, &st.stop_id)
                        .map(String::from)
                })
                .collect::<Option<Vec<String>>>();
            let Some(stop_pattern) = stop_pattern.filter(|p| !p.is_empty()) else {
                log::warn!("trip '{}' visits stops that were not imported, skipping", trip.id);
                continue;
            };
            let points = self.stop_points(stop_pattern.iter());
            let (geometry, is_generated) = match feed.shape_line(trip.shape_id.as_deref()) {
                Some(line) => (line.clone(), false),
                None => (points.iter().map(|p| p.0).collect::<LineString<f64>>(), true),
            };

            let identifier = self.context.feed_identifier(FeedEntityKind::Trip, &trip.id);
            let onestop_id = route_stop_pattern_onestop_id(&route_onestop_id, &stop_pattern);
            let candidate = RouteStopPattern::new(
                onestop_id,
                route_onestop_id,
                stop_pattern,
                geometry,
                is_generated,
            );
            let rsp = self.context.resolve_pattern(candidate)?;
            if rsp.stop_distances.len() != rsp.stop_pattern.len() {
                match calculate_distances(&rsp.geometry, &points) {
                    Ok(distances) => rsp.stop_distances = distances,
                    Err(e) => log::warn!("route stop pattern {}: {e}", rsp.onestop_id),
                }
            }
            rsp.add_trip(&trip.id);
            rsp.identified_by.insert(identifier);
            let onestop_id = rsp.onestop_id.clone();
            self.context
                .map_feed_entity(FeedEntityKind::Trip, &trip.id, &onestop_id);
        }
        log::info!("  route stop patterns: {}", self.context.patterns.len());
        Ok(())
    }

    /// resolves the declared operators, returning their Onestop IDs. an
    /// operator whose agency is not in the feed is skipped.
    pub fn load_operators(
        &mut self,
        operators_in_feed: &[OperatorInFeed],
    ) -> Result<BTreeSet<String>, ImportError> {
        log::info!("  operators");
        let feed = self.feed;
        let mut operators = BTreeSet::new();
        for oif in operators_in_feed.iter() {
            let Some(agency) = feed.agency(oif.gtfs_agency_id.as_deref()) else {
                log::debug!(
                    "agency {:?} for operator {} not found in feed",
                    oif.gtfs_agency_id,
                    oif.operator_onestop_id
                );
                continue;
            };
            let routes: BTreeSet<String> = feed
                .agency_routes(agency)
                .into_iter()
                .filter_map(|r| self.context.resolve_by_feed_entity(FeedEntityKind::Route, &r.id))
                .map(String::from)
                .collect();
            let stops: BTreeSet<String> = routes
                .iter()
                .filter_map(|id| self.context.routes.get(id))
                .flat_map(|r| r.serves.iter().cloned())
                .collect();
            let points = self.stop_points(stops.iter());
            let hull = (!points.is_empty()).then(|| geometry_ops::convex_hull(&points));

            let agency_id = agency.id.clone().unwrap_or_default();
            let identifier = self.context.feed_identifier(FeedEntityKind::Agency, &agency_id);
            let mut candidate = Operator::new(oif.operator_onestop_id.clone(), agency.name.clone());
            candidate.geometry = hull.clone();
            candidate.timezone = agency.timezone.clone();
            candidate.website = agency.url.clone();
            let operator = self.context.resolve_operator(candidate)?;
            operator.geometry = match (operator.geometry.take(), hull) {
                (Some(stored), Some(hull)) => Some(geometry_ops::merge_hulls(&stored, &hull)),
                (stored, hull) => stored.or(hull),
            };
            if operator.timezone.is_none() {
                operator.timezone = agency.timezone.clone();
            }
            if operator.website.is_none() {
                operator.website = agency.url.clone();
            }
            operator.serves.extend(routes.iter().cloned());
            operator.identified_by.insert(identifier);
            let operator_onestop_id = operator.onestop_id.clone();
            let timezone = operator.timezone.clone();

            for route_id in routes.iter() {
                if let Some(route) = self.context.routes.get_mut(route_id) {
                    route.operated_by = Some(operator_onestop_id.clone());
                }
            }
            for stop_id in stops.iter() {
                if let Some(stop) = self.context.stops.get_mut(stop_id) {
                    if stop.timezone.is_none() {
                        stop.timezone = timezone.clone();
                    }
                }
            }
            self.context
                .map_feed_entity(FeedEntityKind::Agency, &agency_id, &operator_onestop_id);
            operators.insert(operator_onestop_id);
        }
        log::info!("  operators: {}", operators.len());
        Ok(operators)
    }

    /// keeps the operators, the routes they serve, the stops of those routes
    /// and the patterns of those routes. route geometries are derived here.
    fn candidate_graph(self, operator_ids: &BTreeSet<String>, simplify_tolerance: f64) -> CandidateGraph {
        let context = &self.context;
        let operators = operator_ids
            .iter()
            .filter_map(|id| context.operators.get(id))
            .cloned()
            .collect_vec();
        let route_ids: BTreeSet<String> = operators
            .iter()
            .flat_map(|o| o.serves.iter())
            .filter(|id| context.routes.contains(id))
            .cloned()
            .collect();

        let mut patterns_by_route: BTreeMap<&str, Vec<RouteStopPattern>> = BTreeMap::new();
        for rsp in context.patterns.values() {
            if route_ids.contains(&rsp.route_onestop_id) {
                patterns_by_route
                    .entry(rsp.route_onestop_id.as_str())
                    .or_default()
                    .push(rsp.clone());
            }
        }

        let routes = route_ids
            .iter()
            .filter_map(|id| context.routes.get(id))
            .map(|route| {
                let mut route = route.clone();
                let patterns = patterns_by_route
                    .get(route.onestop_id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                if let Some(geometry) = route_geometry(patterns, simplify_tolerance) {
                    route.geometry = Some(geometry);
                }
                route
            })
            .collect_vec();

        let mut stop_ids: BTreeSet<String> = routes
            .iter()
            .flat_map(|r| r.serves.iter())
            .filter(|id| context.stops.contains(id))
            .cloned()
            .collect();
        let parents = stop_ids
            .iter()
            .filter_map(|id| context.stops.get(id))
            .filter_map(|s| s.parent_station_onestop_id.clone())
            .filter(|id| context.stops.contains(id))
            .collect_vec();
        stop_ids.extend(parents);
        let stops = stop_ids
            .iter()
            .filter_map(|id| context.stops.get(id))
            .cloned()
            .sorted_by_key(|s: &Stop| s.is_platform())
            .collect_vec();

        let route_stop_patterns = patterns_by_route.into_values().flatten().collect_vec();
        let pattern_ids: BTreeSet<String> = route_stop_patterns
            .iter()
            .map(|rsp| rsp.onestop_id.clone())
            .collect();

        let mut id_map = self.context.id_map().clone();
        id_map.retain(FeedEntityKind::Agency, operator_ids);
        id_map.retain(FeedEntityKind::Route, &route_ids);
        id_map.retain(FeedEntityKind::Stop, &stop_ids);
        id_map.retain(FeedEntityKind::Trip, &pattern_ids);

        let bounding_box = FeedBoundingBox::from_stops(&stops);
        if let Some(bbox) = bounding_box {
            log::info!("  bounding box: {bbox}");
        }
        CandidateGraph {
            operators,
            stops,
            routes,
            route_stop_patterns,
            id_map,
            bounding_box,
        }
    }

    fn add_stop(
        &mut self,
        stop: &FeedStop,
        onestop_id: String,
        name: String,
        location: Point<f64>,
        parent_onestop_id: Option<&str>,
    ) -> Result<(), ImportError> {
        let identifier = self.context.feed_identifier(FeedEntityKind::Stop, &stop.id);
        let wheelchair_boarding = to_tfn(stop.wheelchair_boarding);
        let mut candidate = Stop::new(onestop_id, name, location);
        candidate.timezone = stop.timezone.clone();
        candidate.wheelchair_boarding = wheelchair_boarding;
        if let Some(parent) = parent_onestop_id {
            candidate.set_parent_station(parent);
        }
        let resolved = self.context.resolve_stop(candidate)?;
        if resolved.timezone.is_none() {
            resolved.timezone = stop.timezone.clone();
        }
        if resolved.wheelchair_boarding.is_none() {
            resolved.wheelchair_boarding = wheelchair_boarding;
        }
        resolved.identified_by.insert(identifier);
        let onestop_id = resolved.onestop_id.clone();
        self.context
            .map_feed_entity(FeedEntityKind::Stop, &stop.id, &onestop_id);
        Ok(())
    }

    /// number of parent stations above a stop.
    fn station_depth(&self, stop: &FeedStop) -> usize {
        let mut depth = 0;
        let mut current = stop.parent_station.as_deref();
        while let Some(parent_id) = current {
            depth += 1;
            if depth >= MAX_STATION_DEPTH {
                break;
            }
            current = self
                .feed
                .stops
                .get(parent_id)
                .and_then(|p| p.parent_station.as_deref());
        }
        depth
    }

    fn stop_points<'b>(&self, onestop_ids: impl Iterator<Item = &'b String>) -> Vec<Point<f64>> {
        onestop_ids
            .filter_map(|id| self.context.stops.get(id))
            .map(|s| s.geometry)
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::GtfsGraph;
    use crate::{
        config::OperatorInFeed,
        feed::test_feed::{self, FEED_ONESTOP_ID, OPERATOR_ONESTOP_ID},
        graph::FeedEntityKind,
        import::ImportError,
    };
    use feedeater_core::{
        changeset::InMemoryStore,
        geometry::{simplify_line, SIMPLIFY_TOLERANCE},
        model::entity::{Entity, Operator},
    };
    use geo::{polygon, MultiLineString};

    #[test]
    fn test_one_agency_two_routes_three_stops() {
        let feed = test_feed::feed();
        let config = test_feed::config(1);
        let store = InMemoryStore::default();
        let graph = GtfsGraph::new(&feed, FEED_ONESTOP_ID, &store)
            .build(&config.operators_in_feed, SIMPLIFY_TOLERANCE)
            .expect("should build");

        assert_eq!(graph.operators.len(), 1);
        assert_eq!(graph.stops.len(), 3);
        assert_eq!(graph.routes.len(), 2);
        assert_eq!(graph.route_stop_patterns.len(), 2);

        let operator = &graph.operators[0];
        assert_eq!(operator.onestop_id, OPERATOR_ONESTOP_ID);
        assert_eq!(operator.serves.len(), 2);
        assert!(operator.geometry.is_some());
        assert!(operator
            .identified_by
            .contains("gtfs://f-9q9-caltrain/o/CT"));

        for route in graph.routes.iter() {
            assert_eq!(route.operated_by.as_deref(), Some(OPERATOR_ONESTOP_ID));
            let patterns = graph
                .route_stop_patterns
                .iter()
                .filter(|rsp| rsp.route_onestop_id == route.onestop_id)
                .collect::<Vec<_>>();
            assert_eq!(patterns.len(), 1);
            let expected = MultiLineString::new(vec![simplify_line(
                &patterns[0].geometry,
                SIMPLIFY_TOLERANCE,
            )]);
            assert_eq!(route.geometry.as_ref(), Some(&expected));
        }
        let local = graph
            .routes
            .iter()
            .find(|r| r.name == "Local")
            .expect("local route");
        assert_eq!(local.color.as_deref(), Some("E31837"));
        assert_eq!(local.serves.len(), 3);
        let express = graph
            .routes
            .iter()
            .find(|r| r.name == "Express")
            .expect("express route");
        assert_eq!(express.color, None);
        assert_eq!(express.serves.len(), 2);

        for stop in graph.stops.iter() {
            assert_eq!(stop.timezone.as_deref(), Some("America/Los_Angeles"));
        }
        for rsp in graph.route_stop_patterns.iter() {
            assert!(rsp.is_generated);
            assert_eq!(rsp.stop_pattern.len(), rsp.geometry.0.len());
            assert_eq!(rsp.stop_distances.len(), rsp.stop_pattern.len());
            assert_eq!(rsp.trips.len(), 1);
        }
        assert_eq!(graph.id_map.len(FeedEntityKind::Trip), 2);
        assert!(graph.bounding_box.is_some());
    }

    #[test]
    fn test_shared_stop_sequence_reuses_pattern() {
        let mut feed = test_feed::feed();
        let mut t3 = feed.trips["t2"].clone();
        t3.id = String::from("t3");
        feed.trips.insert(t3.id.clone(), t3);
        let config = test_feed::config(1);
        let store = InMemoryStore::default();
        let graph = GtfsGraph::new(&feed, FEED_ONESTOP_ID, &store)
            .build(&config.operators_in_feed, SIMPLIFY_TOLERANCE)
            .expect("should build");
        assert_eq!(graph.route_stop_patterns.len(), 2);
        let express = graph
            .route_stop_patterns
            .iter()
            .find(|rsp| rsp.trips.contains("t3"))
            .expect("pattern of t3");
        assert!(express.trips.contains("t2"));
        assert_eq!(
            graph.id_map.get(FeedEntityKind::Trip, "t2"),
            graph.id_map.get(FeedEntityKind::Trip, "t3")
        );
    }

    #[test]
    fn test_platforms_are_named_after_parent() {
        let mut feed = test_feed::feed();
        let mut platform = test_feed::stop("A1", "Alpha platform 1", -122.0001, 37.0001);
        platform.parent_station = Some(String::from("A"));
        feed.stops.insert(platform.id.clone(), platform);
        let mut orphan = test_feed::stop("Z1", "Zulu", -122.03, 37.03);
        orphan.parent_station = Some(String::from("Z"));
        feed.stops.insert(orphan.id.clone(), orphan);
        if let Some(t1) = feed.trips.get_mut("t1") {
            t1.stop_times[1].stop_id = String::from("A1");
        }

        let config = test_feed::config(1);
        let store = InMemoryStore::default();
        let mut graph = GtfsGraph::new(&feed, FEED_ONESTOP_ID, &store);
        graph.load_stops().expect("should load stops");
        let parent = graph
            .context()
            .resolve_by_feed_entity(FeedEntityKind::Stop, "A")
            .expect("parent resolved")
            .to_string();
        let child = graph
            .context()
            .resolve_by_feed_entity(FeedEntityKind::Stop, "A1")
            .expect("platform resolved")
            .to_string();
        assert_eq!(child, format!("{parent}<a1"));
        let platform = graph.context().stops.get(&child).expect("platform cached");
        assert_eq!(platform.parent_station_onestop_id.as_deref(), Some(parent.as_str()));
        assert_eq!(
            platform.tags.get("parent_station").map(String::as_str),
            Some(parent.as_str())
        );
        let orphan = graph
            .context()
            .resolve_by_feed_entity(FeedEntityKind::Stop, "Z1")
            .expect("orphan resolved");
        assert!(!orphan.contains('<'));

        let result = graph
            .build(&config.operators_in_feed, SIMPLIFY_TOLERANCE)
            .expect("should build");
        assert!(result.stops.iter().any(|s| s.onestop_id == parent));
        assert!(!result.stops[0].is_platform());
    }

    #[test]
    fn test_single_stop_trip() {
        let mut feed = test_feed::feed();
        if let Some(t1) = feed.trips.get_mut("t1") {
            t1.stop_times.retain(|st| st.stop_id == "A");
        }
        let config = test_feed::config(1);
        let store = InMemoryStore::default();
        let graph = GtfsGraph::new(&feed, FEED_ONESTOP_ID, &store)
            .build(&config.operators_in_feed, SIMPLIFY_TOLERANCE)
            .expect("should build");
        let local = graph
            .routes
            .iter()
            .find(|r| r.name == "Local")
            .expect("local route");
        let geometry = local.geometry.as_ref().expect("route geometry");
        assert_eq!(geometry.0.len(), 1);
        assert_eq!(geometry.0[0].0.len(), 1);
        let rsp = graph
            .route_stop_patterns
            .iter()
            .find(|rsp| rsp.trips.contains("t1"))
            .expect("pattern of t1");
        assert_eq!(rsp.stop_pattern.len(), 1);
    }

    #[test]
    fn test_no_operators_is_fatal() {
        let feed = test_feed::feed();
        let store = InMemoryStore::default();
        let operators = vec![OperatorInFeed {
            gtfs_agency_id: Some(String::from("BART")),
            operator_onestop_id: String::from("o-9q9-bart"),
        }];
        let result = GtfsGraph::new(&feed, FEED_ONESTOP_ID, &store)
            .build(&operators, SIMPLIFY_TOLERANCE);
        assert!(matches!(result, Err(ImportError::NoOperatorsFound)));
    }

    #[test]
    fn test_operator_geometry_merges_with_stored() {
        let mut stored = Operator::new(String::from(OPERATOR_ONESTOP_ID), String::from("Caltrain"));
        stored.geometry = Some(polygon![
            (x: -121.0, y: 36.0),
            (x: -120.9, y: 36.0),
            (x: -120.9, y: 36.1),
            (x: -121.0, y: 36.0),
        ]);
        let store =
            InMemoryStore::from_entities(vec![Entity::from(stored)]).expect("valid store");
        let feed = test_feed::feed();
        let config = test_feed::config(1);
        let graph = GtfsGraph::new(&feed, FEED_ONESTOP_ID, &store)
            .build(&config.operators_in_feed, SIMPLIFY_TOLERANCE)
            .expect("should build");
        let hull = graph.operators[0].geometry.as_ref().expect("merged hull");
        let xs = hull.exterior().coords().map(|c| c.x).collect::<Vec<_>>();
        assert!(xs.iter().any(|x| *x == -120.9));
        assert!(xs.iter().any(|x| *x == -122.02));
    }
}
