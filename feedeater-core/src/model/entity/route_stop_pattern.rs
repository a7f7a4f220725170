use std::collections::{BTreeMap, BTreeSet};

use geo::{Coord, LineString};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::geometry::{geometry_codec, geometry_ops};

/// an ordered sequence of stops traversed by one or more trips of a route,
/// along with the line traveled and the distance of each stop along it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStopPattern {
    pub onestop_id: String,
    #[serde(rename = "traversedBy")]
    pub route_onestop_id: String,
    pub stop_pattern: Vec<String>,
    #[serde(with = "geometry_codec::line_string")]
    pub geometry: LineString<f64>,
    /// meters along `geometry` for each entry of `stop_pattern`
    #[serde(default)]
    pub stop_distances: Vec<f64>,
    #[serde(default)]
    pub trips: BTreeSet<String>,
    /// geometry was built from the stop locations because the trip has no shape
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default)]
    pub is_modified: bool,
    #[serde(default)]
    pub identified_by: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl RouteStopPattern {
    /// creates a pattern. geometry coordinates are rounded to the precision
    /// stored for all geometries.
    pub fn new(
        onestop_id: String,
        route_onestop_id: String,
        stop_pattern: Vec<String>,
        geometry: LineString<f64>,
        is_generated: bool,
    ) -> RouteStopPattern {
        RouteStopPattern {
            onestop_id,
            route_onestop_id,
            stop_pattern,
            geometry: geometry_ops::round_line(&geometry),
            stop_distances: vec![],
            trips: BTreeSet::new(),
            is_generated,
            is_modified: false,
            identified_by: BTreeSet::new(),
            tags: BTreeMap::new(),
        }
    }

    /// adds a trip traversing this pattern. returns false if it was already present.
    pub fn add_trip(&mut self, trip_id: &str) -> bool {
        self.trips.insert(trip_id.to_string())
    }

    pub fn distinct_stop_count(&self) -> usize {
        self.stop_pattern.iter().unique().count()
    }

    /// consecutive (from, to) stop pairs along the pattern.
    pub fn stop_pairs(&self) -> impl Iterator<Item = (&String, &String)> + '_ {
        self.stop_pattern.iter().tuple_windows()
    }

    /// a pattern that only ever visits one stop has no edges and no meaningful line.
    pub fn has_single_stop(&self) -> bool {
        self.distinct_stop_count() < 2
    }

    /// true if the line is made of exactly the stop coordinates and nothing else.
    pub fn line_only_stop_points(&self, stop_coords: &[Coord<f64>]) -> bool {
        let stops = stop_coords
            .iter()
            .map(|c| geometry_ops::round_coord(*c))
            .collect_vec();
        let line = self
            .geometry
            .0
            .iter()
            .map(|c| geometry_ops::round_coord(*c))
            .collect_vec();
        stops == line
    }

    /// index of `stop_onestop_id` in the stop pattern, searching forward from `from`.
    /// loops visit the same stop more than once, so callers walk a trip in order
    /// and pass the previous match.
    pub fn index_of_stop(&self, stop_onestop_id: &str, from: usize) -> Option<usize> {
        self.stop_pattern
            .iter()
            .skip(from)
            .position(|s| s == stop_onestop_id)
            .map(|i| i + from)
    }
}
