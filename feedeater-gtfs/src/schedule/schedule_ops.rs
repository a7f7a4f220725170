use std::collections::BTreeMap;

use feedeater_core::model::entity::{PickupType, RouteStopPattern, ScheduleStopPair, ServicePeriod};
use itertools::Itertools;

use super::Timepoint;
use crate::feed::{FeedStopTime, FeedTrip};

/// GTFS tri-state code: 0 unknown, 1 yes, 2 no.
pub fn to_tfn(code: u8) -> Option<bool> {
    match code {
        1 => Some(true),
        2 => Some(false),
        _ => None,
    }
}

/// GTFS `pickup_type` / `drop_off_type` code. regular service is `None`.
pub fn to_pickup_type(code: u8) -> Option<PickupType> {
    match code {
        1 => Some(PickupType::Unavailable),
        2 => Some(PickupType::AskAgency),
        3 => Some(PickupType::AskDriver),
        _ => None,
    }
}

/// distance along the pattern of each stop of a trip. the trip is walked in
/// order and each stop is matched at or after the previous match, so a loop
/// visiting a stop twice gets both of its distances.
pub fn pattern_distances(pattern: &RouteStopPattern, stop_onestop_ids: &[&str]) -> Vec<Option<f64>> {
    if pattern.stop_distances.len() != pattern.stop_pattern.len() {
        return vec![None; stop_onestop_ids.len()];
    }
    let mut from = 0;
    stop_onestop_ids
        .iter()
        .map(|id| {
            let index = pattern.index_of_stop(id, from)?;
            from = index + 1;
            pattern.stop_distances.get(index).copied()
        })
        .collect_vec()
}

/// identifiers and attributes shared by every edge of one trip.
#[derive(Debug, Clone, Copy)]
pub struct TripEdges<'a> {
    pub trip: &'a FeedTrip,
    pub route_onestop_id: &'a str,
    pub route_stop_pattern_onestop_id: &'a str,
    pub operator_onestop_id: Option<&'a str>,
    pub service: Option<&'a ServicePeriod>,
}

/// one stop visited by a trip.
#[derive(Debug, Clone, Copy)]
pub struct EdgeStop<'a> {
    pub stop_time: &'a FeedStopTime,
    pub onestop_id: &'a str,
    pub timezone: Option<&'a str>,
    pub dist_traveled: Option<f64>,
    pub timepoint: Timepoint,
}

/// the edge between two consecutive stops of a trip. pickup is taken from the
/// origin, drop-off and shape distance from the destination.
pub fn make_ssp(edges: &TripEdges, origin: &EdgeStop, destination: &EdgeStop) -> ScheduleStopPair {
    let trip = edges.trip;
    ScheduleStopPair {
        origin_onestop_id: origin.onestop_id.to_string(),
        destination_onestop_id: destination.onestop_id.to_string(),
        route_onestop_id: edges.route_onestop_id.to_string(),
        route_stop_pattern_onestop_id: edges.route_stop_pattern_onestop_id.to_string(),
        operator_onestop_id: edges.operator_onestop_id.map(String::from),
        trip: trip.id.clone(),
        trip_headsign: origin
            .stop_time
            .stop_headsign
            .clone()
            .or_else(|| trip.trip_headsign.clone()),
        trip_short_name: trip.trip_short_name.clone(),
        origin_timezone: origin.timezone.map(String::from),
        destination_timezone: destination.timezone.map(String::from),
        origin_arrival_time: origin.timepoint.arrival,
        origin_departure_time: origin.timepoint.departure,
        destination_arrival_time: destination.timepoint.arrival,
        destination_departure_time: destination.timepoint.departure,
        origin_timepoint_source: origin.timepoint.source,
        destination_timepoint_source: destination.timepoint.source,
        origin_dist_traveled: origin.dist_traveled,
        destination_dist_traveled: destination.dist_traveled,
        shape_dist_traveled: destination.stop_time.shape_dist_traveled,
        service: edges.service.cloned(),
        wheelchair_accessible: to_tfn(trip.wheelchair_accessible),
        bikes_allowed: to_tfn(trip.bikes_allowed),
        pickup_type: to_pickup_type(origin.stop_time.pickup_type),
        drop_off_type: to_pickup_type(destination.stop_time.drop_off_type),
        tags: BTreeMap::new(),
    }
}

/// one edge per pair of consecutive stops.
pub fn trip_ssps(edges: &TripEdges, stops: &[EdgeStop]) -> Vec<ScheduleStopPair> {
    stops
        .iter()
        .tuple_windows()
        .map(|(origin, destination)| make_ssp(edges, origin, destination))
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{feed::test_feed, schedule::interpolate_times};
    use feedeater_core::model::entity::{GtfsTime, TimepointSource};
    use geo::line_string;

    #[test]
    fn test_code_mappings() {
        assert_eq!(to_tfn(0), None);
        assert_eq!(to_tfn(1), Some(true));
        assert_eq!(to_tfn(2), Some(false));
        assert_eq!(to_pickup_type(0), None);
        assert_eq!(to_pickup_type(1), Some(PickupType::Unavailable));
        assert_eq!(to_pickup_type(2), Some(PickupType::AskAgency));
        assert_eq!(to_pickup_type(3), Some(PickupType::AskDriver));
    }

    #[test]
    fn test_pattern_distances_walk_loops_forward() {
        let mut rsp = RouteStopPattern::new(
            String::from("r-9q9-loop-00000001"),
            String::from("r-9q9-loop"),
            vec![String::from("s-a"), String::from("s-b"), String::from("s-a")],
            line_string![(x: 0.0, y: 0.0), (x: 0.001, y: 0.0), (x: 0.0, y: 0.0)],
            true,
        );
        rsp.stop_distances = vec![0.0, 111.0, 222.0];
        let distances = pattern_distances(&rsp, &["s-a", "s-b", "s-a"]);
        assert_eq!(distances, vec![Some(0.0), Some(111.0), Some(222.0)]);

        rsp.stop_distances = vec![];
        assert_eq!(pattern_distances(&rsp, &["s-a", "s-b"]), vec![None, None]);
    }

    #[test]
    fn test_trip_ssps() {
        let feed = test_feed::feed();
        let trip = &feed.trips["t1"];
        let mut stop_times = trip.stop_times.clone();
        stop_times.sort_by_key(|st| st.stop_sequence);
        stop_times[0].pickup_type = 1;
        stop_times[1].drop_off_type = 3;
        stop_times[1].shape_dist_traveled = Some(1.5);
        let timepoints = interpolate_times(&stop_times, &[]);
        let ids = ["s-a-alpha", "s-b-bravo", "s-c-charlie"];
        let stops = stop_times
            .iter()
            .zip(timepoints)
            .zip(ids)
            .map(|((stop_time, timepoint), onestop_id)| EdgeStop {
                stop_time,
                onestop_id,
                timezone: Some("America/Los_Angeles"),
                dist_traveled: None,
                timepoint,
            })
            .collect_vec();
        let edges = TripEdges {
            trip,
            route_onestop_id: "r-9q9-local",
            route_stop_pattern_onestop_id: "r-9q9-local-00000001",
            operator_onestop_id: Some("o-9q9-caltrain"),
            service: feed.services.get(&trip.service_id),
        };
        let ssps = trip_ssps(&edges, &stops);
        assert_eq!(ssps.len(), 2);
        let first = &ssps[0];
        assert_eq!(first.origin_onestop_id, "s-a-alpha");
        assert_eq!(first.destination_onestop_id, "s-b-bravo");
        assert_eq!(first.trip_headsign.as_deref(), Some("San Jose"));
        assert_eq!(first.wheelchair_accessible, Some(true));
        assert_eq!(first.bikes_allowed, Some(false));
        assert_eq!(first.pickup_type, Some(PickupType::Unavailable));
        assert_eq!(first.drop_off_type, Some(PickupType::AskDriver));
        assert_eq!(first.shape_dist_traveled, Some(1.5));
        assert_eq!(first.origin_departure_time, Some(GtfsTime::from_hms(8, 0, 0)));
        assert_eq!(first.destination_arrival_time, Some(GtfsTime::from_hms(8, 10, 0)));
        assert_eq!(first.destination_timepoint_source, Some(TimepointSource::TlLinear));
        assert!(first.service.is_some());
        assert_eq!(ssps[1].origin_timepoint_source, Some(TimepointSource::TlLinear));
        assert_eq!(ssps[1].destination_timepoint_source, Some(TimepointSource::GtfsExact));
    }
}
