use std::collections::{BTreeMap, HashMap};

use feedeater_core::model::entity::ServicePeriod;
use geo::{LineString, Point};
use itertools::Itertools;

use super::{FeedAgency, FeedRoute, FeedStop, FeedTrip};

/// a transit feed held in memory, indexed by GTFS identifier.
#[derive(Debug, Clone, Default)]
pub struct FeedSource {
    pub agencies: Vec<FeedAgency>,
    pub routes: BTreeMap<String, FeedRoute>,
    pub stops: BTreeMap<String, FeedStop>,
    pub trips: BTreeMap<String, FeedTrip>,
    pub shapes: HashMap<String, LineString<f64>>,
    pub services: HashMap<String, ServicePeriod>,
}

impl FeedSource {
    /// the agency with this `agency_id`. `None` finds an agency without an id.
    pub fn agency(&self, agency_id: Option<&str>) -> Option<&FeedAgency> {
        self.agencies.iter().find(|a| a.id.as_deref() == agency_id)
    }

    /// routes operated by the agency. in a single-agency feed, routes may omit
    /// their agency id.
    pub fn agency_routes(&self, agency: &FeedAgency) -> Vec<&FeedRoute> {
        let single_agency = self.agencies.len() == 1;
        self.routes
            .values()
            .filter(|r| match &r.agency_id {
                Some(id) => agency.id.as_deref() == Some(id.as_str()),
                None => single_agency || agency.id.is_none(),
            })
            .collect_vec()
    }

    pub fn route_trips<'a>(&'a self, route_id: &'a str) -> impl Iterator<Item = &'a FeedTrip> + 'a {
        self.trips.values().filter(move |t| t.route_id == route_id)
    }

    /// location of a stop, falling back to its parent station's location.
    pub fn stop_location(&self, stop_id: &str) -> Option<Point<f64>> {
        let stop = self.stops.get(stop_id)?;
        if let Some(location) = stop.location {
            return Some(location);
        }
        stop.parent_station
            .as_ref()
            .and_then(|parent_id| self.stops.get(parent_id))
            .and_then(|parent| parent.location)
    }

    /// the trip's shape, if it has one with at least two points.
    pub fn shape_line(&self, shape_id: Option<&str>) -> Option<&LineString<f64>> {
        self.shapes
            .get(shape_id?)
            .filter(|line| line.0.len() > 1)
    }

    pub fn stop_time_count(&self) -> usize {
        self.trips.values().map(|t| t.stop_times.len()).sum()
    }

    /// trip ids in sorted order, grouped so that each group holds at most
    /// `max_stop_times` stop times. a trip larger than that forms its own group.
    pub fn trip_chunks(&self, max_stop_times: usize) -> Vec<Vec<String>> {
        let mut chunks: Vec<Vec<String>> = vec![];
        let mut current: Vec<String> = vec![];
        let mut current_rows = 0;
        for trip in self.trips.values() {
            let rows = trip.stop_times.len();
            if !current.is_empty() && current_rows + rows > max_stop_times {
                chunks.push(std::mem::take(&mut current));
                current_rows = 0;
            }
            current.push(trip.id.clone());
            current_rows += rows;
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::FeedSource;
    use crate::feed::{FeedAgency, FeedRoute, FeedStop, FeedStopTime, FeedTrip};
    use geo::point;

    fn trip(id: &str, route_id: &str, stop_times: usize) -> FeedTrip {
        FeedTrip {
            id: id.to_string(),
            route_id: route_id.to_string(),
            service_id: String::from("weekday"),
            shape_id: None,
            trip_headsign: None,
            trip_short_name: None,
            wheelchair_accessible: 0,
            bikes_allowed: 0,
            stop_times: (0..stop_times)
                .map(|i| FeedStopTime {
                    stop_id: format!("stop{i}"),
                    stop_sequence: i as u32,
                    arrival_time: None,
                    departure_time: None,
                    stop_headsign: None,
                    pickup_type: 0,
                    drop_off_type: 0,
                    shape_dist_traveled: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_trip_chunks() {
        let mut feed = FeedSource::default();
        for (id, n) in [("t1", 4), ("t2", 4), ("t3", 12), ("t4", 2), ("t5", 3)] {
            feed.trips.insert(id.to_string(), trip(id, "r1", n));
        }
        let chunks = feed.trip_chunks(10);
        assert_eq!(
            chunks,
            vec![
                vec![String::from("t1"), String::from("t2")],
                vec![String::from("t3")],
                vec![String::from("t4"), String::from("t5")],
            ]
        );
    }

    #[test]
    fn test_parent_location_fallback() {
        let mut feed = FeedSource::default();
        feed.stops.insert(
            String::from("station"),
            FeedStop {
                id: String::from("station"),
                name: Some(String::from("Station")),
                location: Some(point!(x: -122.0, y: 37.0)),
                parent_station: None,
                timezone: None,
                wheelchair_boarding: 0,
            },
        );
        feed.stops.insert(
            String::from("entrance"),
            FeedStop {
                id: String::from("entrance"),
                name: None,
                location: None,
                parent_station: Some(String::from("station")),
                timezone: None,
                wheelchair_boarding: 0,
            },
        );
        assert_eq!(feed.stop_location("entrance"), Some(point!(x: -122.0, y: 37.0)));
        assert_eq!(feed.stop_location("missing"), None);
    }

    #[test]
    fn test_agency_routes() {
        let mut feed = FeedSource::default();
        feed.agencies.push(FeedAgency {
            id: None,
            name: String::from("Caltrain"),
            url: None,
            timezone: None,
        });
        feed.routes.insert(
            String::from("local"),
            FeedRoute {
                id: String::from("local"),
                agency_id: None,
                short_name: None,
                long_name: Some(String::from("Local")),
                route_type: 2,
                color: None,
            },
        );
        let agency = feed.agency(None).expect("agency without id");
        assert_eq!(feed.agency_routes(agency).len(), 1);
        assert!(feed.agency(Some("CT")).is_none());
    }
}
