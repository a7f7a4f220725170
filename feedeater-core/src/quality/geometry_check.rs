use std::collections::BTreeSet;

use geo::{Coord, Point};
use itertools::Itertools;

use super::{stop_lookup::StopLookup, QualityCheck, QualityReport};
use crate::{
    changeset::{AppliedChangeset, ChangesetError, EntityStore, EntityStoreExt},
    geometry::{geometry_ops, is_outlier_stop},
    model::{
        entity::{EntityKind, RouteStopPattern, Stop},
        issue::{Issue, IssueType},
    },
};

/// adjacent distinct stops of a pattern closer than this are reported.
pub const MINIMUM_DISTANCE_BETWEEN_STOPS_METERS: f64 = 10.0;
/// adjacent stops closer than this may share a stop distance.
pub const DUPLICATE_STOP_TOLERANCE_METERS: f64 = 1.0;
/// how far the last stop distance may exceed the length of the line.
pub const LAST_STOP_DISTANCE_LENIENCY_METERS: f64 = 5.0;

/// checks pattern geometries, stop positions and stop distances.
///
/// evaluates every pattern touched by the changeset. for changesets not
/// imported from a feed, patterns that visit a touched stop are evaluated too.
pub struct GeometryCheck;

impl QualityCheck for GeometryCheck {
    fn name(&self) -> &'static str {
        "geometry"
    }

    fn check(
        &self,
        store: &dyn EntityStore,
        changeset: &AppliedChangeset,
    ) -> Result<QualityReport, ChangesetError> {
        let mut lookup = StopLookup::new(store);
        let mut issues = vec![];
        let mut patterns_to_evaluate: BTreeSet<String> = BTreeSet::new();
        let mut stop_pattern_pairs: BTreeSet<(String, String)> = BTreeSet::new();

        for onestop_id in changeset.touched(EntityKind::RouteStopPattern) {
            let Some(rsp) = store.find::<RouteStopPattern>(onestop_id)? else {
                continue;
            };
            patterns_to_evaluate.insert(rsp.onestop_id.clone());
            for stop_onestop_id in rsp.stop_pattern.iter().unique() {
                if lookup.get(stop_onestop_id)?.is_some() {
                    stop_pattern_pairs.insert((rsp.onestop_id.clone(), stop_onestop_id.clone()));
                }
            }
            issues.extend(line_only_stop_points(&rsp, &mut lookup)?);
        }

        for onestop_id in changeset.touched(EntityKind::Stop) {
            if !changeset.is_feed_import() {
                for rsp in store.patterns_serving_stop(onestop_id)? {
                    stop_pattern_pairs.insert((rsp.onestop_id.clone(), onestop_id.clone()));
                    patterns_to_evaluate.insert(rsp.onestop_id);
                }
            }
            if let Some(stop) = lookup.get(onestop_id)? {
                if stop.geometry.x() == 0.0 && stop.geometry.y() == 0.0 {
                    let issue = Issue::new(
                        IssueType::StopPositionInaccurate,
                        format!("stop {} is located at (0, 0)", stop.onestop_id),
                    )
                    .with_entity(&stop.onestop_id, "geometry");
                    issues.push(issue);
                }
            }
        }

        let mut distance_tests = 0;
        for onestop_id in patterns_to_evaluate.iter() {
            let Some(rsp) = store.find::<RouteStopPattern>(onestop_id)? else {
                continue;
            };
            distance_tests += rsp.stop_pattern.len();
            if is_single_point(&rsp) {
                continue;
            }
            if rsp.stop_distances.len() != rsp.stop_pattern.len() {
                log::warn!(
                    "pattern {} has {} stop distances for {} stops, skipping distance checks",
                    rsp.onestop_id,
                    rsp.stop_distances.len(),
                    rsp.stop_pattern.len()
                );
                continue;
            }
            let stops = rsp
                .stop_pattern
                .iter()
                .map(|id| lookup.get(id).map(|s| s.cloned()))
                .collect::<Result<Vec<_>, _>>()?;
            for index in 1..rsp.stop_pattern.len() {
                if let (Some(previous), Some(current)) = (&stops[index - 1], &stops[index]) {
                    issues.extend(stops_too_close(&rsp, previous, current));
                    issues.extend(distance_inaccurate(&rsp, index, previous, current));
                }
            }
            issues.extend(last_stop_beyond_line(&rsp));
        }

        for (rsp_onestop_id, stop_onestop_id) in stop_pattern_pairs.iter() {
            let Some(rsp) = store.find::<RouteStopPattern>(rsp_onestop_id)? else {
                continue;
            };
            let Some(stop) = lookup.get(stop_onestop_id)? else {
                continue;
            };
            if !is_single_point(&rsp) && is_outlier_stop(&rsp.geometry, &stop.geometry) {
                let issue = Issue::new(
                    IssueType::StopRspDistanceGap,
                    format!(
                        "stop {} is too far from route stop pattern {}",
                        stop.onestop_id, rsp.onestop_id
                    ),
                )
                .with_entity(&stop.onestop_id, "geometry")
                .with_entity(&rsp.onestop_id, "geometry");
                issues.push(issue);
            }
        }

        let distance_issues = issues
            .iter()
            .filter(|i| i.issue_type == IssueType::DistanceCalculationInaccurate)
            .count();
        Ok(QualityReport {
            issues,
            distance_tests,
            distance_issues,
            distance_score: None,
        })
    }
}

fn is_single_point(rsp: &RouteStopPattern) -> bool {
    rsp.geometry.coords().unique_by(|c| (c.x.to_bits(), c.y.to_bits())).count() <= 1
}

fn line_only_stop_points(
    rsp: &RouteStopPattern,
    lookup: &mut StopLookup,
) -> Result<Option<Issue>, ChangesetError> {
    if rsp.stop_pattern.len() != rsp.geometry.0.len() {
        return Ok(None);
    }
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(rsp.stop_pattern.len());
    for onestop_id in rsp.stop_pattern.iter() {
        match lookup.get(onestop_id)? {
            Some(stop) => coords.push(stop.geometry.0),
            None => return Ok(None),
        }
    }
    if !rsp.line_only_stop_points(&coords) {
        return Ok(None);
    }
    let issue = Issue::new(
        IssueType::RspLineOnlyStopPoints,
        format!(
            "route stop pattern {} has a line made only of its stop coordinates",
            rsp.onestop_id
        ),
    )
    .with_entity(&rsp.onestop_id, "geometry");
    Ok(Some(issue))
}

fn stops_too_close(rsp: &RouteStopPattern, previous: &Stop, current: &Stop) -> Option<Issue> {
    if previous.onestop_id == current.onestop_id {
        return None;
    }
    let distance = distance_between(previous, current);
    if distance >= MINIMUM_DISTANCE_BETWEEN_STOPS_METERS {
        return None;
    }
    let issue = Issue::new(
        IssueType::RspStopsTooClose,
        format!(
            "route stop pattern {}: stop {} at {} is {distance:.1}m from stop {} at {}",
            rsp.onestop_id,
            previous.onestop_id,
            format_point(&previous.geometry),
            current.onestop_id,
            format_point(&current.geometry)
        ),
    )
    .with_entity(&rsp.onestop_id, "geometry")
    .with_entity(&current.onestop_id, "geometry")
    .with_entity(&previous.onestop_id, "geometry");
    Some(issue)
}

/// compares the distance of the stop at `index` with that of the stop before it.
fn distance_inaccurate(
    rsp: &RouteStopPattern,
    index: usize,
    previous: &Stop,
    current: &Stop,
) -> Option<Issue> {
    let before = rsp.stop_distances[index - 1];
    let at = rsp.stop_distances[index];
    let stop_count = rsp.stop_pattern.len();
    let details = if before == at {
        if previous.onestop_id == current.onestop_id
            || distance_between(previous, current) < DUPLICATE_STOP_TOLERANCE_METERS
        {
            return None;
        }
        format!(
            "stop {}, number {}/{stop_count} of route stop pattern {}, has the same distance ({at} m) as stop {}. distances: {:?}",
            current.onestop_id,
            index + 1,
            rsp.onestop_id,
            previous.onestop_id,
            rsp.stop_distances
        )
    } else if before > at {
        format!(
            "stop {}, number {}/{stop_count} of route stop pattern {}, comes after stop {} but has a smaller distance ({at} m < {before} m). distances: {:?}",
            current.onestop_id,
            index + 1,
            rsp.onestop_id,
            previous.onestop_id,
            rsp.stop_distances
        )
    } else {
        return None;
    };
    let issue = Issue::new(IssueType::DistanceCalculationInaccurate, details)
        .with_entity(&rsp.onestop_id, "stop_distances")
        .with_entity(&previous.onestop_id, "geometry")
        .with_entity(&current.onestop_id, "geometry");
    Some(issue)
}

fn last_stop_beyond_line(rsp: &RouteStopPattern) -> Option<Issue> {
    let last = *rsp.stop_distances.last()?;
    let length = geometry_ops::line_length(&rsp.geometry);
    if last - length <= LAST_STOP_DISTANCE_LENIENCY_METERS {
        return None;
    }
    let last_stop = rsp.stop_pattern.last()?;
    let issue = Issue::new(
        IssueType::DistanceCalculationInaccurate,
        format!(
            "stop {last_stop}, last of route stop pattern {}, has a distance ({last} m) beyond the length of the line ({length:.1} m). distances: {:?}",
            rsp.onestop_id, rsp.stop_distances
        ),
    )
    .with_entity(&rsp.onestop_id, "stop_distances")
    .with_entity(last_stop, "geometry");
    Some(issue)
}

fn distance_between(a: &Stop, b: &Stop) -> f64 {
    geometry_ops::haversine_distance(&a.geometry, &b.geometry)
}

fn format_point(point: &Point<f64>) -> String {
    format!("({}, {})", point.x(), point.y())
}

#[cfg(test)]
mod tests {
    use super::GeometryCheck;
    use crate::changeset::{AppliedChangeset, InMemoryStore};
    use crate::model::entity::{Entity, EntityKind, RouteStopPattern, Stop};
    use crate::model::issue::IssueType;
    use crate::quality::QualityCheck;
    use geo::{point, LineString, Point};
    use std::collections::BTreeSet;

    const RSP: &str = "r-9q9-local-1a2b3c4d";

    fn stops(lats: &[f64]) -> Vec<Stop> {
        lats.iter()
            .enumerate()
            .map(|(i, lat)| {
                Stop::new(
                    format!("s-9q9-stop{i}"),
                    format!("Stop {i}"),
                    point!(x: -122.0, y: *lat),
                )
            })
            .collect()
    }

    fn pattern(stops: &[Stop], distances: Vec<f64>) -> RouteStopPattern {
        let line: LineString<f64> = stops.iter().map(|s| s.geometry).collect::<Vec<Point<f64>>>().into();
        let mut rsp = RouteStopPattern::new(
            RSP.to_string(),
            String::from("r-9q9-local"),
            stops.iter().map(|s| s.onestop_id.clone()).collect(),
            line,
            true,
        );
        rsp.stop_distances = distances;
        rsp
    }

    fn changeset(kind: EntityKind, ids: &[&str], feed: Option<&str>) -> AppliedChangeset {
        let mut changeset = AppliedChangeset {
            imported_from_feed: feed.map(String::from),
            ..Default::default()
        };
        changeset.touched.insert(
            kind,
            ids.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        );
        changeset
    }

    fn store(stops: Vec<Stop>, rsp: RouteStopPattern) -> InMemoryStore {
        let mut entities = stops.into_iter().map(Entity::from).collect::<Vec<_>>();
        entities.push(Entity::from(rsp));
        InMemoryStore::from_entities(entities).expect("should build store")
    }

    fn count(issues: &[crate::model::issue::Issue], issue_type: IssueType) -> usize {
        issues.iter().filter(|i| i.issue_type == issue_type).count()
    }

    #[test]
    fn test_repeated_distance() {
        let stops = stops(&[37.0, 37.0005, 37.001, 37.0015]);
        let rsp = pattern(&stops, vec![0.0, 50.0, 50.0, 120.0]);
        let store = store(stops, rsp);
        let report = GeometryCheck
            .check(
                &store,
                &changeset(EntityKind::RouteStopPattern, &[RSP], Some("f-9q9-caltrain")),
            )
            .expect("check should run");
        assert_eq!(count(&report.issues, IssueType::DistanceCalculationInaccurate), 1);
        // the line was generated from the stops
        assert_eq!(count(&report.issues, IssueType::RspLineOnlyStopPoints), 1);
        assert_eq!(report.distance_tests, 4);
        assert_eq!(report.distance_issues, 1);
    }

    #[test]
    fn test_decreasing_and_overlong_distances() {
        let stops = stops(&[37.0, 37.001, 37.002]);
        // the line is about 222m long
        let rsp = pattern(&stops, vec![0.0, 150.0, 100.0]);
        let store = store(stops.clone(), rsp);
        let report = GeometryCheck
            .check(&store, &changeset(EntityKind::RouteStopPattern, &[RSP], None))
            .expect("check should run");
        assert_eq!(count(&report.issues, IssueType::DistanceCalculationInaccurate), 1);

        let rsp = pattern(&stops, vec![0.0, 111.0, 300.0]);
        let store = self::store(stops, rsp);
        let report = GeometryCheck
            .check(&store, &changeset(EntityKind::RouteStopPattern, &[RSP], None))
            .expect("check should run");
        assert_eq!(count(&report.issues, IssueType::DistanceCalculationInaccurate), 1);
    }

    #[test]
    fn test_stops_too_close_and_null_island() {
        let mut stops = stops(&[37.0, 37.00005, 37.001]);
        let rsp = pattern(&stops, vec![0.0, 5.5, 111.0]);
        stops.push(Stop::new(
            String::from("s-s00-nowhere"),
            String::from("Nowhere"),
            point!(x: 0.0, y: 0.0),
        ));
        let store = store(stops, rsp);
        let mut changeset = changeset(EntityKind::RouteStopPattern, &[RSP], None);
        changeset
            .touched
            .insert(EntityKind::Stop, BTreeSet::from([String::from("s-s00-nowhere")]));
        let report = GeometryCheck
            .check(&store, &changeset)
            .expect("check should run");
        assert_eq!(count(&report.issues, IssueType::RspStopsTooClose), 1);
        assert_eq!(count(&report.issues, IssueType::StopPositionInaccurate), 1);
        assert_eq!(count(&report.issues, IssueType::DistanceCalculationInaccurate), 0);
    }

    #[test]
    fn test_touched_stop_pulls_in_patterns() {
        let mut stops = stops(&[37.0, 37.001, 37.002]);
        let rsp = pattern(&stops, vec![0.0, 111.2, 222.4]);
        // the middle stop was moved 0.002 degrees of longitude (about 178m) off the line
        stops[1].geometry = point!(x: -122.002, y: 37.001);
        let store = store(stops, rsp);
        let edit = changeset(EntityKind::Stop, &["s-9q9-stop1"], None);
        let report = GeometryCheck.check(&store, &edit).expect("check should run");
        assert_eq!(count(&report.issues, IssueType::StopRspDistanceGap), 1);
        assert_eq!(report.distance_tests, 3);

        // feed imports only evaluate the patterns they touched
        let import = changeset(EntityKind::Stop, &["s-9q9-stop1"], Some("f-9q9-caltrain"));
        let report = GeometryCheck.check(&store, &import).expect("check should run");
        assert!(report.issues.is_empty());
        assert_eq!(report.distance_tests, 0);
    }
}
