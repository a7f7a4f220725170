use std::collections::BTreeMap;

use geo::{LineString, MultiLineString, Simplify};
use itertools::Itertools;

use crate::model::entity::RouteStopPattern;

/// Douglas-Peucker tolerance, in degrees, applied to route geometries.
pub const SIMPLIFY_TOLERANCE: f64 = 1e-5;

/// selects a subset of a route's patterns whose stop pairs cover every stop
/// pair of the route.
///
/// a greedy set cover: take the smallest uncovered stop pair, choose among the
/// patterns serving it the one visiting the most distinct stops (ties go to the
/// smallest Onestop ID), mark every pair of that pattern covered and repeat
/// until no pair is left. a route whose patterns each visit a single stop
/// yields its first pattern.
///
/// self pairs `(a, a)`, from a stop repeated back to back, are not part of the
/// coverage: every pair between two different consecutive stops is covered.
pub fn representative_patterns(patterns: &[RouteStopPattern]) -> Vec<&RouteStopPattern> {
    let mut uncovered: BTreeMap<(&str, &str), Vec<&RouteStopPattern>> = BTreeMap::new();
    for rsp in patterns {
        for (from, to) in rsp.stop_pairs().filter(|(from, to)| from != to) {
            uncovered
                .entry((from.as_str(), to.as_str()))
                .or_default()
                .push(rsp);
        }
    }
    if uncovered.is_empty() {
        return patterns.iter().take(1).collect_vec();
    }

    let mut selected: Vec<&RouteStopPattern> = vec![];
    while let Some((_, candidates)) = uncovered.pop_first() {
        let chosen = candidates.into_iter().max_by(|a, b| {
            a.distinct_stop_count()
                .cmp(&b.distinct_stop_count())
                .then_with(|| b.onestop_id.cmp(&a.onestop_id))
        });
        let Some(chosen) = chosen else {
            continue;
        };
        for (from, to) in chosen.stop_pairs() {
            uncovered.remove(&(from.as_str(), to.as_str()));
        }
        selected.push(chosen);
    }
    selected
}

/// Douglas-Peucker simplification of a line. lines with fewer than three
/// distinct coordinates are returned unchanged.
pub fn simplify_line(line: &LineString<f64>, tolerance: f64) -> LineString<f64> {
    let distinct = line.coords().dedup().count();
    if distinct < 3 {
        return line.clone();
    }
    line.simplify(&tolerance)
}

/// the representative geometry of a route: the simplified line of each
/// representative pattern. `None` when the route has no patterns.
pub fn route_geometry(
    patterns: &[RouteStopPattern],
    tolerance: f64,
) -> Option<MultiLineString<f64>> {
    let lines = representative_patterns(patterns)
        .into_iter()
        .map(|rsp| simplify_line(&rsp.geometry, tolerance))
        .collect_vec();
    if lines.is_empty() {
        None
    } else {
        Some(MultiLineString::new(lines))
    }
}
